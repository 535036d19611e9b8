//! Year-to-date cumulative state (spec §3 entity 7, §4.9).
//!
//! The engine consumes this; it never mutates it. The calling system owns
//! the read-side contract described in spec §4.9: supply YTD for the same
//! calendar year as the pay date, reset to zero on the year's first pay
//! date, and re-run corrected periods rather than patching YTD in place.

use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct YtdState {
    pub ytd_pensionable: Money,
    pub ytd_cpp_base: Money,
    pub ytd_cpp_additional: Money,
    pub ytd_insurable: Money,
    pub ytd_ei_premium: Money,
    pub ytd_gross_taxable: Money,
}
