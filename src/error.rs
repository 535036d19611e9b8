//! Stable error taxonomy for the payroll engine.
//!
//! Every failure the engine can produce is one of these kinds. None of them
//! is recoverable inside the engine: the core is side-effect-free, so a
//! `PayrollError` leaves no residue and the caller is always looking at a
//! clean, unmutated world.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::edition::TaxEdition;
use crate::jurisdiction::Jurisdiction;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PayrollError {
    #[error("unsupported jurisdiction: {code} (Quebec and non-Canadian codes are not handled by this engine)")]
    UnsupportedJurisdiction { code: String },

    #[error("no tax edition is known for pay date {pay_date}")]
    UnknownEdition { pay_date: NaiveDate },

    #[error("tax table not loaded for year {year}, edition {edition:?}, jurisdiction {jurisdiction:?}")]
    MissingTaxTable {
        year: i32,
        edition: TaxEdition,
        jurisdiction: Option<Jurisdiction>,
    },

    #[error("tax table for year {year}, edition {edition:?} failed validation: {reason}")]
    InvalidTaxTable {
        year: i32,
        edition: TaxEdition,
        reason: String,
    },

    #[error("invalid input: field `{field}` = {value} is not valid ({reason})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("year-to-date field `{field}` = {value} already exceeds its annual cap of {cap}")]
    YtdExceedsCap {
        field: &'static str,
        value: Decimal,
        cap: Decimal,
    },

    #[error("internal consistency check failed: {detail}")]
    InternalConsistency { detail: String },
}

impl PayrollError {
    pub fn invalid_input(
        field: &'static str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        PayrollError::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
