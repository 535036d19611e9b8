//! CPP calculator (C4): base contribution, the second additional tier
//! (CPP2), and the F2 enhancement slice, all YTD-capped.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::frequency::PayFrequency;
use crate::money::{cap_and_round, round2, Money};
use crate::tables::CppEiTable;
use crate::ytd::YtdState;

/// Result of a single period's CPP calculation (spec §3 entity 8).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CppContribution {
    pub base: Money,
    pub additional: Money,
    pub enhancement_f2: Money,
    pub employee_total: Money,
    pub employer_total: Money,
}

impl CppContribution {
    fn zero() -> Self {
        Self::default()
    }
}

/// CPP exemption flags relevant to a single calculation (CPT30 is
/// distinct from a blanket CPP exemption: it only suppresses CPP2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CppFlags {
    pub is_cpp_exempt: bool,
    pub is_cpp2_exempt: bool,
}

/// Computes this period's CPP contribution.
///
/// `pensionable` is the period's pensionable earnings (PI). `ytd` must
/// reflect totals *before* this period. Caps are applied against the
/// remaining room under the annual cap, never against the period
/// candidate alone, so a period late in the year that would otherwise
/// exceed the cap is trimmed to exactly what's left.
pub fn calculate(
    table: &CppEiTable,
    pensionable: Money,
    ytd: &YtdState,
    frequency: PayFrequency,
    flags: CppFlags,
) -> CppContribution {
    if flags.is_cpp_exempt {
        return CppContribution::zero();
    }

    let periods = Decimal::from(frequency.periods_per_year());
    let exempt_per_period = table.basic_exemption / periods;

    let base_candidate = table.base_rate * (pensionable - exempt_per_period).max(Decimal::ZERO);
    let base_remaining_cap = table.max_base_annual - ytd.ytd_cpp_base;
    let base = cap_and_round(base_candidate, base_remaining_cap);

    let additional = if flags.is_cpp2_exempt {
        Decimal::ZERO
    } else {
        let ympe_per_period = table.ympe / periods;
        let band_width_per_period = (table.yampe - table.ympe) / periods;
        let band = (pensionable - ympe_per_period)
            .max(Decimal::ZERO)
            .min(band_width_per_period);
        let additional_candidate = table.additional_rate * band;
        let additional_remaining_cap = table.max_additional_annual - ytd.ytd_cpp_additional;
        cap_and_round(additional_candidate, additional_remaining_cap)
    };

    let enhancement_f2 = round2(base * (table.first_enhancement_rate / table.base_rate));
    let employee_total = base + additional;

    CppContribution {
        base,
        additional,
        enhancement_f2,
        employee_total,
        employer_total: employee_total,
    }
}
