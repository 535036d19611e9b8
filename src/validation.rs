//! Validation layer (C10): strict-reject input checks run before any
//! calculation begins (spec §4.10). Jurisdiction itself never needs a
//! runtime check here: `Jurisdiction` is a closed Rust enum, so a QC or
//! unrecognized code is already rejected when the caller parses it.

use rust_decimal::Decimal;

use crate::earnings::PeriodEarnings;
use crate::error::PayrollError;
use crate::profile::EmployeeTaxProfile;
use crate::tables::{CppEiTable, FederalTable, ProvincialTable};
use crate::ytd::YtdState;

fn reject_negative(field: &'static str, value: Decimal) -> Result<(), PayrollError> {
    if value < Decimal::ZERO {
        return Err(PayrollError::invalid_input(field, value, "monetary fields must be non-negative"));
    }
    Ok(())
}

pub fn validate_earnings(earnings: &PeriodEarnings) -> Result<(), PayrollError> {
    reject_negative("earnings.gross_regular", earnings.gross_regular)?;
    reject_negative("earnings.gross_overtime", earnings.gross_overtime)?;
    reject_negative("earnings.holiday_pay", earnings.holiday_pay)?;
    reject_negative("earnings.holiday_premium", earnings.holiday_premium)?;
    reject_negative("earnings.vacation_payout", earnings.vacation_payout)?;
    reject_negative("earnings.other_taxable_earnings", earnings.other_taxable_earnings)?;
    reject_negative("earnings.taxable_benefits_pensionable", earnings.taxable_benefits_pensionable)?;
    reject_negative("earnings.non_cash_taxable_benefits", earnings.non_cash_taxable_benefits)
}

pub fn validate_profile(profile: &EmployeeTaxProfile) -> Result<(), PayrollError> {
    reject_negative("profile.federal_claim_amount", profile.federal_claim_amount)?;
    reject_negative("profile.provincial_claim_amount", profile.provincial_claim_amount)?;
    reject_negative("profile.rrsp_per_period", profile.rrsp_per_period)?;
    reject_negative("profile.union_dues_per_period", profile.union_dues_per_period)?;
    reject_negative("profile.other_tax_credits_k3", profile.other_tax_credits_k3)
}

pub fn validate_ytd(ytd: &YtdState, cpp_ei: &CppEiTable) -> Result<(), PayrollError> {
    reject_negative("ytd.ytd_pensionable", ytd.ytd_pensionable)?;
    reject_negative("ytd.ytd_cpp_base", ytd.ytd_cpp_base)?;
    reject_negative("ytd.ytd_cpp_additional", ytd.ytd_cpp_additional)?;
    reject_negative("ytd.ytd_insurable", ytd.ytd_insurable)?;
    reject_negative("ytd.ytd_ei_premium", ytd.ytd_ei_premium)?;
    reject_negative("ytd.ytd_gross_taxable", ytd.ytd_gross_taxable)?;

    if ytd.ytd_cpp_base > cpp_ei.max_base_annual {
        return Err(PayrollError::YtdExceedsCap {
            field: "ytd.ytd_cpp_base",
            value: ytd.ytd_cpp_base,
            cap: cpp_ei.max_base_annual,
        });
    }
    if ytd.ytd_cpp_additional > cpp_ei.max_additional_annual {
        return Err(PayrollError::YtdExceedsCap {
            field: "ytd.ytd_cpp_additional",
            value: ytd.ytd_cpp_additional,
            cap: cpp_ei.max_additional_annual,
        });
    }
    if ytd.ytd_ei_premium > cpp_ei.ei.max_premium_annual {
        return Err(PayrollError::YtdExceedsCap {
            field: "ytd.ytd_ei_premium",
            value: ytd.ytd_ei_premium,
            cap: cpp_ei.ei.max_premium_annual,
        });
    }
    Ok(())
}

pub fn validate_claim_floors(
    profile: &EmployeeTaxProfile,
    federal: &FederalTable,
    provincial: &ProvincialTable,
) -> Result<(), PayrollError> {
    if profile.federal_claim_amount < federal.bpaf.minimum {
        return Err(PayrollError::invalid_input(
            "profile.federal_claim_amount",
            profile.federal_claim_amount,
            format!("must be at least the federal basic personal amount floor of {}", federal.bpaf.minimum),
        ));
    }

    let provincial_floor = provincial.bpa.floor(&federal.bpaf);
    if profile.provincial_claim_amount < provincial_floor {
        return Err(PayrollError::invalid_input(
            "profile.provincial_claim_amount",
            profile.provincial_claim_amount,
            format!("must be at least the provincial basic personal amount floor of {provincial_floor}"),
        ));
    }
    Ok(())
}
