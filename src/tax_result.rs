//! Shared result shape for the federal and provincial tax calculators
//! (spec §3 entity 10): the annualization method produces the same
//! breakdown regardless of jurisdiction, just with different constants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CreditsBreakdown {
    pub k1: Money,
    pub k2: Money,
    pub k3: Money,
    pub k4: Money,
    /// Alberta-only supplemental credit; `None` everywhere else.
    pub k5p: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub annual_taxable_income: Money,
    pub rate_used: Decimal,
    pub constant_used: Money,
    pub credits: CreditsBreakdown,
    /// T3 (federal) or T4 (provincial): before surtax/health/reduction.
    pub basic_annual_tax: Money,
    /// T1 (federal) or T2 (provincial): after any jurisdiction-specific
    /// adjustments.
    pub final_annual_tax: Money,
    pub per_period_withholding: Money,
}
