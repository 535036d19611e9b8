//! Structured calculation-details audit record (spec §3 entity 11, §9:
//! "must be a structured record, not a free-form map").

use serde::{Deserialize, Serialize};

use crate::edition::TaxEdition;
use crate::jurisdiction::Jurisdiction;
use crate::money::Money;
use crate::tax_result::TaxResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub edition: TaxEdition,
    pub jurisdiction: Jurisdiction,
    pub annual_taxable_income: Money,
    pub federal: TaxResult,
    pub provincial: TaxResult,
    /// Ontario surtax (V1), present only for `Jurisdiction::ON`.
    pub ontario_surtax_v1: Option<Money>,
    /// Ontario health premium (V2), present only for `Jurisdiction::ON`.
    pub ontario_health_premium_v2: Option<Money>,
    /// BC tax reduction (S), present only for `Jurisdiction::BC`.
    pub bc_tax_reduction_s: Option<Money>,
}
