//! Tax edition selection (C3): mapping a pay date to the rate-table edition
//! in effect on that date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// A unit of rate-table versioning. The authority republishes its payroll
/// deductions formulas up to twice a year; each publication is an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxEdition {
    /// January-June 2025: 15% lowest federal rate.
    Edition120,
    /// July 2025 onward: 14% lowest federal rate.
    Edition121,
}

impl TaxEdition {
    pub const fn year(self) -> i32 {
        match self {
            TaxEdition::Edition120 | TaxEdition::Edition121 => 2025,
        }
    }
}

/// Maps a pay date to the edition in effect for withholding purposes. Uses
/// the **pay date**, not the period start/end, per spec §4.3: that's when
/// withholding is actually effected.
pub fn select_edition(pay_date: NaiveDate) -> Result<TaxEdition, PayrollError> {
    let year = pay_date.year_ce().1 as i32;
    let july_first_2025 = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");

    match year {
        2025 if pay_date < july_first_2025 => Ok(TaxEdition::Edition120),
        2025 => Ok(TaxEdition::Edition121),
        _ => Err(PayrollError::UnknownEdition { pay_date }),
    }
}
