//! A pay period's earnings snapshot (spec §3 entity 6) and the two derived
//! earnings bases (pensionable, insurable) every downstream calculator
//! consumes.

use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodEarnings {
    pub gross_regular: Money,
    pub gross_overtime: Money,
    pub holiday_pay: Money,
    pub holiday_premium: Money,
    pub vacation_payout: Money,
    pub other_taxable_earnings: Money,
    /// Taxable benefits that are pensionable (count toward CPP and taxable
    /// income) but are NOT insurable (excluded from EI).
    pub taxable_benefits_pensionable: Money,
    /// Non-cash taxable benefits: pensionable and part of taxable income,
    /// but never insurable.
    pub non_cash_taxable_benefits: Money,
}

impl PeriodEarnings {
    /// Pensionable earnings: gross income plus taxable benefits for the
    /// period, excluding reimbursements (which never appear in the other
    /// fields to begin with).
    pub fn pensionable(&self) -> Money {
        self.gross_regular
            + self.gross_overtime
            + self.holiday_pay
            + self.holiday_premium
            + self.vacation_payout
            + self.other_taxable_earnings
            + self.taxable_benefits_pensionable
            + self.non_cash_taxable_benefits
    }

    /// Insurable earnings: pensionable earnings minus non-cash taxable
    /// benefits (spec §3 entity 6 / §4.5).
    pub fn insurable(&self) -> Money {
        self.pensionable() - self.non_cash_taxable_benefits
    }

    /// Total gross taxable pay for the period (used in the net-pay
    /// identity); identical to pensionable earnings since taxable benefits
    /// are part of both.
    pub fn gross_taxable(&self) -> Money {
        self.pensionable()
    }
}
