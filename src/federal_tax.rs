//! Federal tax calculator (C6): the annualization method against the
//! federal bracket table.

use rust_decimal::Decimal;

use crate::frequency::PayFrequency;
use crate::money::{round2, Money};
use crate::tables::{bracket_for, FederalTable};
use crate::tax_result::{CreditsBreakdown, TaxResult};

/// Everything the annualization method needs for a single period, beyond
/// the table itself. `cpp_base_this_period` is deliberately just the base
/// tier (never `base + additional`): the K2 credit ratio applies only to
/// the pre-enhancement portion of base CPP (spec §4.8 step 7).
pub struct FederalTaxInput {
    pub gross_this_period: Money,
    pub rrsp_per_period: Money,
    pub union_dues_per_period: Money,
    pub f2_enhancement: Money,
    pub cpp2_this_period: Money,
    pub other_pre_tax_k3_per_period: Money,
    pub federal_claim_amount: Money,
    pub other_tax_credits_k3: Money,
    pub cpp_base_this_period: Money,
    pub ei_premium_this_period: Money,
    /// `pre_enhancement_base_rate / base_rate` from the CPP/EI table
    /// (spec §9: must be table-sourced, never hardcoded, since it shifts
    /// whenever the authority changes the base rate).
    pub cpp_credit_ratio: Decimal,
    pub frequency: PayFrequency,
}

/// Annual taxable income, shared verbatim between the federal and
/// provincial calculators (spec §4.7 step 1: "Same A as federal").
pub fn annual_taxable_income(input: &FederalTaxInput) -> Money {
    let periods = Decimal::from(input.frequency.periods_per_year());
    let per_period = input.gross_this_period
        - input.rrsp_per_period
        - input.union_dues_per_period
        - input.f2_enhancement
        - input.cpp2_this_period
        - input.other_pre_tax_k3_per_period;
    (periods * per_period).max(Decimal::ZERO)
}

pub fn calculate(table: &FederalTable, input: &FederalTaxInput, annual_taxable_income: Money) -> TaxResult {
    let periods = Decimal::from(input.frequency.periods_per_year());
    let bracket = bracket_for(&table.brackets, annual_taxable_income);

    let k1 = table.lowest_rate * input.federal_claim_amount;
    let k2 = k2_credit(table, input, periods);
    let k3 = input.other_tax_credits_k3;
    let k4 = (table.lowest_rate * annual_taxable_income).min(table.lowest_rate * table.cea);

    let basic_annual_tax = (bracket.rate * annual_taxable_income - bracket.k - k1 - k2 - k3 - k4).max(Decimal::ZERO);
    let final_annual_tax = basic_annual_tax;
    let per_period_withholding = round2(final_annual_tax / periods);

    TaxResult {
        annual_taxable_income,
        rate_used: bracket.rate,
        constant_used: bracket.k,
        credits: CreditsBreakdown {
            k1,
            k2,
            k3,
            k4,
            k5p: None,
        },
        basic_annual_tax,
        final_annual_tax,
        per_period_withholding,
    }
}

/// K2: the CPP/EI premium credit.
pub(crate) fn k2_credit(
    table: &FederalTable,
    input: &FederalTaxInput,
    periods: Decimal,
) -> Money {
    let cpp_credit = (periods * input.cpp_base_this_period * input.cpp_credit_ratio).min(table.max_annual_cpp_credit_base);
    let ei_credit = (periods * input.ei_premium_this_period).min(table.max_annual_ei_credit);
    table.lowest_rate * (cpp_credit + ei_credit)
}
