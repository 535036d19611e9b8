//! Typed shapes for the versioned rate tables (spec §3 entity 4, §6).
//!
//! JSON on disk carries only `{upper, rate}` per bracket; `k` is never
//! hand-authored. The loader derives it from the continuous
//! piecewise-linear formula in `derive_brackets`, which is the single
//! source of truth for the bracket-continuity invariant rather than a
//! separate check against a hand-maintained number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub k: Decimal,
}

/// Derives `k` for every bracket and validates ascending, non-overlapping
/// bounds with a final `+inf` sentinel and rates in `[0, 1]` (spec §4.2).
pub fn derive_brackets(raw: &[RawBracket]) -> Result<Vec<Bracket>, String> {
    if raw.is_empty() {
        return Err("bracket list is empty".to_string());
    }
    let Some(last) = raw.last() else {
        return Err("bracket list is empty".to_string());
    };
    if last.upper.is_some() {
        return Err("final bracket must have no upper bound (+inf sentinel)".to_string());
    }
    for (i, b) in raw.iter().enumerate() {
        if i + 1 < raw.len() && b.upper.is_none() {
            return Err(format!("bracket {i} has no upper bound but is not the last bracket"));
        }
        if b.rate < Decimal::ZERO || b.rate > Decimal::ONE {
            return Err(format!("bracket {i} rate {} is outside [0, 1]", b.rate));
        }
    }
    for w in raw.windows(2) {
        let (prev, next) = (w[0], w[1]);
        let prev_upper = prev.upper.expect("non-terminal bracket has upper bound");
        if let Some(next_upper) = next.upper {
            if next_upper <= prev_upper {
                return Err("bracket upper bounds must be strictly ascending".to_string());
            }
        }
    }

    let mut out = Vec::with_capacity(raw.len());
    for (i, b) in raw.iter().enumerate() {
        let mut k = Decimal::ZERO;
        let mut band_lower = Decimal::ZERO;
        for prior in &raw[..i] {
            let prior_upper = prior.upper.expect("prior bracket has upper bound");
            let width = prior_upper - band_lower;
            k += (b.rate - prior.rate) * width;
            band_lower = prior_upper;
        }
        out.push(Bracket {
            upper: b.upper,
            rate: b.rate,
            k,
        });
    }
    Ok(out)
}

/// Finds the bracket covering annual income `a`: the first bracket whose
/// upper bound is `>= a`, or the terminal (no-upper) bracket.
pub fn bracket_for(brackets: &[Bracket], a: Decimal) -> &Bracket {
    brackets
        .iter()
        .find(|b| b.upper.map(|u| a <= u).unwrap_or(true))
        .expect("bracket list always has a terminal +inf bracket")
}

/// Parameters of the dynamic BPA formula shared by the federal table and
/// Yukon (spec §4.7): flat at `maximum` up to `threshold_lower`, phases
/// linearly down to `minimum` by `threshold_upper`, flat at `minimum`
/// above that.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DynamicBpaParams {
    pub minimum: Decimal,
    pub maximum: Decimal,
    pub threshold_lower: Decimal,
    pub threshold_upper: Decimal,
}

impl DynamicBpaParams {
    pub fn amount(&self, net_income: Decimal) -> Decimal {
        if net_income <= self.threshold_lower {
            self.maximum
        } else if net_income >= self.threshold_upper {
            self.minimum
        } else {
            let phase_out_amount = self.maximum - self.minimum;
            let width = self.threshold_upper - self.threshold_lower;
            self.maximum - phase_out_amount * (net_income - self.threshold_lower) / width
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FederalTableRaw {
    pub bpaf: DynamicBpaParams,
    pub cea: Decimal,
    pub max_annual_cpp_credit_base: Decimal,
    pub max_annual_ei_credit: Decimal,
    pub lowest_rate: Decimal,
    pub brackets: Vec<RawBracket>,
}

#[derive(Debug, Clone)]
pub struct FederalTable {
    pub bpaf: DynamicBpaParams,
    pub cea: Decimal,
    pub max_annual_cpp_credit_base: Decimal,
    pub max_annual_ei_credit: Decimal,
    pub lowest_rate: Decimal,
    pub brackets: Vec<Bracket>,
}

impl FederalTable {
    pub fn from_raw(raw: FederalTableRaw) -> Result<Self, String> {
        let brackets = derive_brackets(&raw.brackets)?;
        Ok(FederalTable {
            bpaf: raw.bpaf,
            cea: raw.cea,
            max_annual_cpp_credit_base: raw.max_annual_cpp_credit_base,
            max_annual_ei_credit: raw.max_annual_ei_credit,
            lowest_rate: raw.lowest_rate,
            brackets,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EiRates {
    pub employee_rate: Decimal,
    pub employer_ratio: Decimal,
    pub mie: Decimal,
    pub max_premium_annual: Decimal,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CppEiTable {
    pub basic_exemption: Decimal,
    pub ympe: Decimal,
    pub yampe: Decimal,
    pub base_rate: Decimal,
    pub pre_enhancement_base_rate: Decimal,
    pub first_enhancement_rate: Decimal,
    pub additional_rate: Decimal,
    pub max_base_annual: Decimal,
    pub max_additional_annual: Decimal,
    pub ei: EiRates,
}

/// Basic personal amount rule for a jurisdiction (spec §4.7).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Bpa {
    Static { value: Decimal },
    /// Shares the federal dynamic formula verbatim (Yukon).
    Yukon,
    Manitoba {
        base: Decimal,
        phase_out_start: Decimal,
        phase_out_end: Decimal,
    },
    NovaScotia {
        base: Decimal,
        band_start: Decimal,
        band_end: Decimal,
        increment_max: Decimal,
    },
}

impl Bpa {
    /// `net_income` is used for Manitoba (phases down with rising net
    /// income) and for the Yukon/federal-shared formula; `annual_income`
    /// (A) is used for Nova Scotia, which ramps up with annual income.
    pub fn amount(&self, net_income: Decimal, annual_income: Decimal, federal: &DynamicBpaParams) -> Decimal {
        match self {
            Bpa::Static { value } => *value,
            Bpa::Yukon => federal.amount(net_income),
            Bpa::Manitoba {
                base,
                phase_out_start,
                phase_out_end,
            } => {
                if net_income <= *phase_out_start {
                    *base
                } else if net_income >= *phase_out_end {
                    Decimal::ZERO
                } else {
                    let width = *phase_out_end - *phase_out_start;
                    (*base - *base * (net_income - *phase_out_start) / width).max(Decimal::ZERO)
                }
            }
            Bpa::NovaScotia {
                base,
                band_start,
                band_end,
                increment_max,
            } => {
                if annual_income <= *band_start {
                    *base
                } else if annual_income >= *band_end {
                    *base + *increment_max
                } else {
                    let width = *band_end - *band_start;
                    *base + *increment_max * (annual_income - *band_start) / width
                }
            }
        }
    }

    /// The lowest amount this rule can ever produce, used as the
    /// statutory claim-amount floor in validation (spec §4.10).
    pub fn floor(&self, federal: &DynamicBpaParams) -> Decimal {
        match self {
            Bpa::Static { value } => *value,
            Bpa::Yukon => federal.minimum,
            Bpa::Manitoba { .. } => Decimal::ZERO,
            Bpa::NovaScotia { base, .. } => *base,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OntarioSurtax {
    pub threshold1: Decimal,
    pub threshold2: Decimal,
    pub rate1: Decimal,
    pub rate2: Decimal,
}

impl OntarioSurtax {
    /// `t4` is the provincial basic annual tax the surtax applies on top of.
    pub fn amount(&self, t4: Decimal) -> Decimal {
        let over1 = (t4 - self.threshold1).max(Decimal::ZERO);
        let over2 = (t4 - self.threshold2).max(Decimal::ZERO);
        self.rate1 * over1 + self.rate2 * over2
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HealthPremiumBand {
    pub threshold: Decimal,
    pub base: Decimal,
    pub rate: Decimal,
    pub band_cap: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OntarioHealthPremium {
    pub bands: Vec<HealthPremiumBand>,
}

impl OntarioHealthPremium {
    /// `a` is annual taxable income. Bands must be ordered by ascending
    /// `threshold`; the last band whose threshold the income has reached
    /// applies.
    pub fn amount(&self, a: Decimal) -> Decimal {
        let band = self
            .bands
            .iter()
            .rev()
            .find(|b| a >= b.threshold)
            .unwrap_or_else(|| self.bands.first().expect("health premium has at least one band"));
        (band.base + band.rate * (a - band.threshold)).min(band.band_cap)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BcTaxReduction {
    pub threshold1: Decimal,
    pub threshold2: Decimal,
    pub base: Decimal,
    pub phase_rate: Decimal,
}

impl BcTaxReduction {
    pub fn amount(&self, a: Decimal) -> Decimal {
        if a <= self.threshold1 {
            self.base
        } else if a < self.threshold2 {
            (self.base - self.phase_rate * (a - self.threshold1)).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AlbertaK5p {
    pub threshold: Decimal,
    pub rate_numerator: Decimal,
    pub rate_denominator: Decimal,
}

impl AlbertaK5p {
    pub fn amount(&self, k1p: Decimal, k2p: Decimal) -> Decimal {
        ((k1p + k2p - self.threshold) * (self.rate_numerator / self.rate_denominator)).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvincialTableRaw {
    pub brackets: Vec<RawBracket>,
    pub bpa: Bpa,
    #[serde(default)]
    pub surtax: Option<OntarioSurtax>,
    #[serde(default)]
    pub health_premium: Option<OntarioHealthPremium>,
    #[serde(default)]
    pub tax_reduction: Option<BcTaxReduction>,
    #[serde(default)]
    pub k5p: Option<AlbertaK5p>,
}

#[derive(Debug, Clone)]
pub struct ProvincialTable {
    pub brackets: Vec<Bracket>,
    pub bpa: Bpa,
    pub surtax: Option<OntarioSurtax>,
    pub health_premium: Option<OntarioHealthPremium>,
    pub tax_reduction: Option<BcTaxReduction>,
    pub k5p: Option<AlbertaK5p>,
}

impl ProvincialTable {
    pub fn from_raw(raw: ProvincialTableRaw) -> Result<Self, String> {
        let brackets = derive_brackets(&raw.brackets)?;
        Ok(ProvincialTable {
            brackets,
            bpa: raw.bpa,
            surtax: raw.surtax,
            health_premium: raw.health_premium,
            tax_reduction: raw.tax_reduction,
            k5p: raw.k5p,
        })
    }

    /// `v_low`: this jurisdiction's lowest-bracket rate, used for K1P/K2P.
    pub fn lowest_rate(&self) -> Decimal {
        self.brackets.first().expect("at least one bracket").rate
    }
}

pub fn invalid_table(year: i32, edition: crate::edition::TaxEdition, reason: impl Into<String>) -> PayrollError {
    PayrollError::InvalidTaxTable {
        year,
        edition,
        reason: reason.into(),
    }
}
