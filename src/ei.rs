//! EI calculator (C5): employee premium, employer multiplier, YTD and
//! maximum-insurable-earnings caps.

use rust_decimal_macros::dec;

use crate::money::{cap_and_round, round2, Money};
use crate::tables::CppEiTable;
use crate::ytd::YtdState;

/// Result of a single period's EI calculation (spec §3 entity 9).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EiContribution {
    pub employee_premium: Money,
    pub employer_premium: Money,
}

impl EiContribution {
    fn zero() -> Self {
        Self::default()
    }
}

/// Computes this period's EI premium.
///
/// `insurable` is the period's insurable earnings. `ytd` must reflect
/// totals *before* this period. Once either the YTD premium or the YTD
/// insurable total has reached its annual maximum, the premium drops to
/// zero for the rest of the year — this is normal policy, not a failure.
pub fn calculate(table: &CppEiTable, insurable: Money, ytd: &YtdState, is_ei_exempt: bool) -> EiContribution {
    if is_ei_exempt {
        return EiContribution::zero();
    }

    if ytd.ytd_ei_premium >= table.ei.max_premium_annual || ytd.ytd_insurable >= table.ei.mie {
        return EiContribution::zero();
    }

    let premium_candidate = table.ei.employee_rate * insurable;
    let remaining_cap = table.ei.max_premium_annual - ytd.ytd_ei_premium;
    let employee_premium = cap_and_round(premium_candidate, remaining_cap);
    let employer_premium = round2(employee_premium * table.ei.employer_ratio);

    EiContribution {
        employee_premium,
        employer_premium,
    }
}
