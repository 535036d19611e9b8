//! Payroll engine orchestrator (C8): the single public entry point. Wires
//! C3 (edition selection) through C4-C7 (the four calculators) and
//! assembles the result, re-checking the net-pay identity before handing
//! anything back to the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::CalculationDetails;
use crate::cpp::{self, CppContribution, CppFlags};
use crate::earnings::PeriodEarnings;
use crate::edition::select_edition;
use crate::ei::{self, EiContribution};
use crate::error::PayrollError;
use crate::federal_tax::{self, FederalTaxInput};
use crate::frequency::PayFrequency;
use crate::jurisdiction::Jurisdiction;
use crate::money::{round2, Money};
use crate::profile::EmployeeTaxProfile;
use crate::provincial_tax::{self, ProvincialTaxInput};
use crate::tables::TableRepository;
use crate::tax_result::TaxResult;
use crate::validation;
use crate::ytd::YtdState;

/// Everything `calculate_payroll` needs for a single pay period (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    pub pay_date: NaiveDate,
    pub frequency: PayFrequency,
    pub jurisdiction: Jurisdiction,
    pub profile: EmployeeTaxProfile,
    pub earnings: PeriodEarnings,
    pub ytd: YtdState,
    /// K3 override for this call only; default zero (spec §6).
    #[serde(default)]
    pub other_pre_tax_k3_per_period: Money,
    /// Passed through into the net-pay identity untouched (spec §3
    /// invariant 1).
    #[serde(default)]
    pub other_post_tax_per_period: Money,
}

/// The assembled result of a single calculation (spec §3 entity 11).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResult {
    pub cpp: CppContribution,
    pub ei: EiContribution,
    pub federal_tax: TaxResult,
    pub provincial_tax: TaxResult,
    pub total_employee_deductions: Money,
    pub total_employer_cost: Money,
    pub net_pay: Money,
    pub calculation_details: CalculationDetails,
}

/// The single public entry point (spec §4.8).
pub fn calculate_payroll(repository: &TableRepository, request: &PayrollRequest) -> Result<PayrollResult, PayrollError> {
    validation::validate_earnings(&request.earnings)?;
    validation::validate_profile(&request.profile)?;

    let edition = select_edition(request.pay_date)?;
    let year = edition.year();

    tracing::debug!(
        jurisdiction = %request.jurisdiction,
        frequency = ?request.frequency,
        ?edition,
        "calculating payroll"
    );

    let cpp_ei_table = repository.load_cpp_ei(year)?;
    let federal_table = repository.load_federal(year, edition)?;
    let provincial_table = repository.load_provincial(year, edition, request.jurisdiction)?;

    validation::validate_ytd(&request.ytd, &cpp_ei_table)?;
    validation::validate_claim_floors(&request.profile, &federal_table, &provincial_table)?;

    let pensionable = request.earnings.pensionable();
    let insurable = request.earnings.insurable();
    let gross_taxable = request.earnings.gross_taxable();

    let cpp = cpp::calculate(
        &cpp_ei_table,
        pensionable,
        &request.ytd,
        request.frequency,
        CppFlags {
            is_cpp_exempt: request.profile.is_cpp_exempt,
            is_cpp2_exempt: request.profile.is_cpp2_exempt,
        },
    );

    let ei = ei::calculate(&cpp_ei_table, insurable, &request.ytd, request.profile.is_ei_exempt);

    let cpp_credit_ratio = cpp_ei_table.pre_enhancement_base_rate / cpp_ei_table.base_rate;

    let federal_input = FederalTaxInput {
        gross_this_period: gross_taxable,
        rrsp_per_period: request.profile.rrsp_per_period,
        union_dues_per_period: request.profile.union_dues_per_period,
        f2_enhancement: cpp.enhancement_f2,
        cpp2_this_period: cpp.additional,
        other_pre_tax_k3_per_period: request.other_pre_tax_k3_per_period,
        federal_claim_amount: request.profile.federal_claim_amount,
        other_tax_credits_k3: request.profile.other_tax_credits_k3,
        cpp_base_this_period: cpp.base,
        ei_premium_this_period: ei.employee_premium,
        cpp_credit_ratio,
        frequency: request.frequency,
    };

    let annual_taxable_income = federal_tax::annual_taxable_income(&federal_input);
    let federal_result = federal_tax::calculate(&federal_table, &federal_input, annual_taxable_income);

    let provincial_input = ProvincialTaxInput {
        jurisdiction: request.jurisdiction,
        provincial_claim_amount: request.profile.provincial_claim_amount,
        // The data model carries one standing K3 authorization per
        // employee (spec §3 entity 5); it reduces both the federal and
        // provincial taxable bases identically.
        other_tax_credits_k3p: request.profile.other_tax_credits_k3,
        cpp_base_this_period: cpp.base,
        ei_premium_this_period: ei.employee_premium,
        cpp_credit_ratio,
        frequency: request.frequency,
    };
    let provincial = provincial_tax::calculate(&provincial_table, &federal_table, &provincial_input, annual_taxable_income);

    let total_employee_deductions = round2(
        cpp.employee_total
            + ei.employee_premium
            + federal_result.per_period_withholding
            + provincial.result.per_period_withholding
            + request.profile.rrsp_per_period
            + request.profile.union_dues_per_period
            + request.other_post_tax_per_period,
    );
    let total_employer_cost = round2(gross_taxable + cpp.employer_total + ei.employer_premium);

    let net_pay = round2(
        gross_taxable
            - cpp.employee_total
            - ei.employee_premium
            - federal_result.per_period_withholding
            - provincial.result.per_period_withholding
            - request.profile.rrsp_per_period
            - request.profile.union_dues_per_period
            - request.other_post_tax_per_period,
    );

    if net_pay < Decimal::ZERO {
        return Err(PayrollError::invalid_input(
            "net_pay",
            net_pay,
            "deductions exceed gross taxable pay; this profile would produce negative net pay",
        ));
    }

    let expected_net_pay = round2(gross_taxable - total_employee_deductions);
    if expected_net_pay != net_pay {
        tracing::error!(
            expected = %expected_net_pay,
            actual = %net_pay,
            "net-pay identity violated"
        );
        return Err(PayrollError::InternalConsistency {
            detail: format!("net pay {net_pay} does not reconcile against total employee deductions {total_employee_deductions}"),
        });
    }

    let calculation_details = CalculationDetails {
        edition,
        jurisdiction: request.jurisdiction,
        annual_taxable_income,
        federal: federal_result,
        provincial: provincial.result,
        ontario_surtax_v1: provincial.surtax_v1,
        ontario_health_premium_v2: provincial.health_premium_v2,
        bc_tax_reduction_s: provincial.tax_reduction_s,
    };

    Ok(PayrollResult {
        cpp,
        ei,
        federal_tax: federal_result,
        provincial_tax: provincial.result,
        total_employee_deductions,
        total_employer_cost,
        net_pay,
        calculation_details,
    })
}
