//! The employee's immutable per-request tax profile (spec §3 entity 5).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Snapshot of the declarations an employee has on file (TD1 federal and
/// provincial/territorial forms) plus the exemption flags that change how
/// CPP/EI are computed for this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTaxProfile {
    /// "Total claim amount" (TC) from the federal TD1.
    pub federal_claim_amount: Money,
    /// "Total claim amount" (TCP) from the provincial/territorial TD1.
    pub provincial_claim_amount: Money,
    /// RRSP deduction for this pay period.
    pub rrsp_per_period: Money,
    /// Union dues for this pay period.
    pub union_dues_per_period: Money,
    /// Other authorized deductions that reduce taxable income (K3), default
    /// zero. Distinct from `other_pre_tax_k3_per_period` on the request,
    /// which is reserved for per-call overrides; this field is the
    /// employee's standing authorization.
    #[serde(default)]
    pub other_tax_credits_k3: Money,
    pub is_cpp_exempt: bool,
    pub is_ei_exempt: bool,
    /// CPT30 on file: opts the employee out of CPP2 (the second additional
    /// contribution) on this employment.
    pub is_cpp2_exempt: bool,
}

impl EmployeeTaxProfile {
    /// Statutory floor below which a claim amount cannot be declared: the
    /// minimum basic personal amount for the year (spec §4.10). Tables own
    /// the actual figure; this helper takes it as a parameter so the
    /// validation layer can source it from C2 rather than hardcoding it.
    pub fn validate_claim_floor(claim: Decimal, floor: Decimal, field: &'static str) -> Result<(), crate::error::PayrollError> {
        if claim < floor {
            return Err(crate::error::PayrollError::invalid_input(
                field,
                claim,
                format!("must be at least the basic personal amount floor of {floor}"),
            ));
        }
        Ok(())
    }
}
