//! Pay frequency (component C1's companion in the data model): the number
//! of pay periods in a year, `P`, used throughout the annualization method.

use serde::{Deserialize, Serialize};

/// How often an employee is paid. `periods_per_year` (`P`) is derivable
/// from the variant, never supplied separately, so the two can never
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    /// `P`: the number of pay periods in the year.
    pub const fn periods_per_year(self) -> i64 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::BiWeekly => 26,
            PayFrequency::SemiMonthly => 24,
            PayFrequency::Monthly => 12,
        }
    }
}
