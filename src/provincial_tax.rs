//! Provincial/territorial tax calculator (C7): mirrors the federal
//! annualization method against each jurisdiction's table, then applies
//! whatever jurisdiction-specific adjustment that jurisdiction has
//! (Ontario surtax + health premium, BC tax reduction, Alberta K5P).

use rust_decimal::Decimal;

use crate::frequency::PayFrequency;
use crate::jurisdiction::Jurisdiction;
use crate::money::{round2, Money};
use crate::tables::{bracket_for, FederalTable, ProvincialTable};
use crate::tax_result::{CreditsBreakdown, TaxResult};

pub struct ProvincialTaxInput {
    pub jurisdiction: Jurisdiction,
    pub provincial_claim_amount: Money,
    pub other_tax_credits_k3p: Money,
    pub cpp_base_this_period: Money,
    pub ei_premium_this_period: Money,
    pub cpp_credit_ratio: Decimal,
    pub frequency: PayFrequency,
}

pub struct ProvincialTaxResult {
    pub result: TaxResult,
    pub surtax_v1: Option<Money>,
    pub health_premium_v2: Option<Money>,
    pub tax_reduction_s: Option<Money>,
}

/// `federal` supplies the dynamic BPA formula Yukon shares and the
/// annual CPP/EI credit caps, which spec §4.7 step 4 reuses verbatim
/// ("the same CPP-ratio convention as federal") rather than publishing
/// province-specific ones.
pub fn calculate(
    table: &ProvincialTable,
    federal: &FederalTable,
    input: &ProvincialTaxInput,
    annual_taxable_income: Money,
) -> ProvincialTaxResult {
    let periods = Decimal::from(input.frequency.periods_per_year());
    let bracket = bracket_for(&table.brackets, annual_taxable_income);
    let v_low = table.lowest_rate();

    // K1P is driven by the employee's declared claim amount (TCP), per
    // spec §4.7 step 3 — not by the table's BPA directly. The dynamic
    // BPA formulas (MB/NS/YT) only surface as the statutory floor TCP
    // must clear (`Bpa::floor`, enforced in validation.rs); see
    // DESIGN.md open question 5 for why BPA doesn't re-enter here.
    let k1p = v_low * input.provincial_claim_amount;
    let cpp_credit = (periods * input.cpp_base_this_period * input.cpp_credit_ratio).min(federal.max_annual_cpp_credit_base);
    let ei_credit = (periods * input.ei_premium_this_period).min(federal.max_annual_ei_credit);
    let k2p = v_low * (cpp_credit + ei_credit);
    let k3p = input.other_tax_credits_k3p;

    let k5p = table
        .k5p
        .map(|rule| rule.amount(k1p, k2p))
        .filter(|_| input.jurisdiction == Jurisdiction::AB);

    let t4 = (bracket.rate * annual_taxable_income - bracket.k - k1p - k2p - k5p.unwrap_or(Decimal::ZERO) - k3p).max(Decimal::ZERO);

    let surtax_v1 = table.surtax.map(|s| s.amount(t4));
    let health_premium_v2 = table.health_premium.as_ref().map(|h| h.amount(annual_taxable_income));
    let tax_reduction_s = table.tax_reduction.map(|r| r.amount(annual_taxable_income));

    let t2 = if let Some(reduction) = tax_reduction_s {
        (t4 - reduction).max(Decimal::ZERO)
    } else {
        t4 + surtax_v1.unwrap_or(Decimal::ZERO) + health_premium_v2.unwrap_or(Decimal::ZERO)
    };

    let per_period_withholding = round2(t2 / periods);

    ProvincialTaxResult {
        result: TaxResult {
            annual_taxable_income,
            rate_used: bracket.rate,
            constant_used: bracket.k,
            credits: CreditsBreakdown {
                k1: k1p,
                k2: k2p,
                k3: k3p,
                k4: Decimal::ZERO,
                k5p,
            },
            basic_annual_tax: t4,
            final_annual_tax: t2,
            per_period_withholding,
        },
        surtax_v1,
        health_premium_v2,
        tax_reduction_s,
    }
}
