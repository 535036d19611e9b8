//! Canadian payroll deductions calculation core.
//!
//! A deterministic engine that, given a pay period's earnings snapshot, an
//! employee's tax profile, and year-to-date cumulative state, produces
//! statutory withholdings (CPP, EI, federal and provincial income tax),
//! employer-side costs, and net pay. Implements the annualization method
//! (Option 1) of the tax authority's payroll deductions formulas, July
//! 2025 edition, with forward-compatible edition selection.
//!
//! The engine is a pure function: [`calculate_payroll`] takes an
//! immutable [`PayrollRequest`] plus a [`TableRepository`] and returns a
//! [`PayrollResult`] or a [`PayrollError`]. It owns no mutable state of
//! its own beyond the read-through rate-table cache; year-to-date
//! accumulation is the caller's responsibility (see [`YtdState`]).
//!
//! Quebec (QPP/QPIP, Revenu Québec) is out of scope: [`Jurisdiction`] is a
//! closed 12-member enum that cannot represent it.

pub mod audit;
pub mod cpp;
pub mod earnings;
pub mod edition;
pub mod ei;
pub mod engine;
pub mod error;
pub mod federal_tax;
pub mod frequency;
pub mod jurisdiction;
pub mod money;
pub mod profile;
pub mod provincial_tax;
pub mod tables;
pub mod tax_result;
pub mod validation;
pub mod ytd;

pub use audit::CalculationDetails;
pub use cpp::CppContribution;
pub use earnings::PeriodEarnings;
pub use edition::TaxEdition;
pub use ei::EiContribution;
pub use engine::{calculate_payroll, PayrollRequest, PayrollResult};
pub use error::PayrollError;
pub use frequency::PayFrequency;
pub use jurisdiction::Jurisdiction;
pub use money::Money;
pub use profile::EmployeeTaxProfile;
pub use tables::TableRepository;
pub use tax_result::TaxResult;
pub use ytd::YtdState;
