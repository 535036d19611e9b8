//! Universal invariants (spec §8), exercised as property tests over
//! random inputs in valid ranges.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cdn_payroll_core::{
    calculate_payroll, EmployeeTaxProfile, Jurisdiction, PayFrequency, PayrollRequest, PeriodEarnings, TableRepository, YtdState,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A provincial claim amount safe against every jurisdiction's static BPA
/// floor (Alberta's $21,885 is the highest), since these properties run
/// across the whole jurisdiction set generically.
fn profile() -> EmployeeTaxProfile {
    EmployeeTaxProfile {
        federal_claim_amount: dec!(16129.00),
        provincial_claim_amount: dec!(22000.00),
        rrsp_per_period: dec!(0),
        union_dues_per_period: dec!(0),
        other_tax_credits_k3: dec!(0),
        is_cpp_exempt: false,
        is_ei_exempt: false,
        is_cpp2_exempt: false,
    }
}

fn request_with_gross(gross: Decimal, jurisdiction: Jurisdiction, frequency: PayFrequency) -> PayrollRequest {
    PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency,
        jurisdiction,
        profile: profile(),
        earnings: PeriodEarnings { gross_regular: gross, ..PeriodEarnings::default() },
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    }
}

fn jurisdiction_strategy() -> impl Strategy<Value = Jurisdiction> {
    prop_oneof![
        Just(Jurisdiction::AB),
        Just(Jurisdiction::BC),
        Just(Jurisdiction::MB),
        Just(Jurisdiction::NB),
        Just(Jurisdiction::NL),
        Just(Jurisdiction::NS),
        Just(Jurisdiction::NT),
        Just(Jurisdiction::NU),
        Just(Jurisdiction::ON),
        Just(Jurisdiction::PE),
        Just(Jurisdiction::SK),
        Just(Jurisdiction::YT),
    ]
}

fn frequency_strategy() -> impl Strategy<Value = PayFrequency> {
    prop_oneof![
        Just(PayFrequency::Weekly),
        Just(PayFrequency::BiWeekly),
        Just(PayFrequency::SemiMonthly),
        Just(PayFrequency::Monthly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// `sum(components) = net_pay` to the cent, for any valid gross,
    /// jurisdiction, and frequency.
    #[test]
    fn net_pay_identity_holds(
        gross_cents in 0u32..2_000_000u32,
        jurisdiction in jurisdiction_strategy(),
        frequency in frequency_strategy(),
    ) {
        let gross = Decimal::new(gross_cents as i64, 2);
        let repo = TableRepository::new();
        let request = request_with_gross(gross, jurisdiction, frequency);
        let result = calculate_payroll(&repo, &request).expect("valid inputs always calculate");

        let reconciled = result.cpp.employee_total
            + result.ei.employee_premium
            + result.federal_tax.per_period_withholding
            + result.provincial_tax.per_period_withholding
            + request.profile.rrsp_per_period
            + request.profile.union_dues_per_period;
        prop_assert_eq!(gross - reconciled, result.net_pay);
    }

    /// `cpp.employer_total == cpp.employee_total` (statutory match).
    #[test]
    fn cpp_employer_matches_employee(
        gross_cents in 0u32..2_000_000u32,
        jurisdiction in jurisdiction_strategy(),
        frequency in frequency_strategy(),
    ) {
        let gross = Decimal::new(gross_cents as i64, 2);
        let repo = TableRepository::new();
        let request = request_with_gross(gross, jurisdiction, frequency);
        let result = calculate_payroll(&repo, &request).unwrap();
        prop_assert_eq!(result.cpp.employer_total, result.cpp.employee_total);
    }

    /// `ei.employer_premium == round2(ei.employee_premium * ratio)`.
    #[test]
    fn ei_employer_premium_is_exact_ratio(
        gross_cents in 0u32..2_000_000u32,
        jurisdiction in jurisdiction_strategy(),
        frequency in frequency_strategy(),
    ) {
        let gross = Decimal::new(gross_cents as i64, 2);
        let repo = TableRepository::new();
        let request = request_with_gross(gross, jurisdiction, frequency);
        let result = calculate_payroll(&repo, &request).unwrap();
        let expected = cdn_payroll_core::money::round2(result.ei.employee_premium * dec!(1.4));
        prop_assert_eq!(result.ei.employer_premium, expected);
    }

    /// An exempt flag zeroes its contribution regardless of earnings.
    #[test]
    fn exempt_flags_zero_their_contribution(
        gross_cents in 0u32..2_000_000u32,
        jurisdiction in jurisdiction_strategy(),
    ) {
        let gross = Decimal::new(gross_cents as i64, 2);
        let repo = TableRepository::new();
        let mut request = request_with_gross(gross, jurisdiction, PayFrequency::BiWeekly);
        request.profile.is_cpp_exempt = true;
        request.profile.is_ei_exempt = true;
        let result = calculate_payroll(&repo, &request).unwrap();
        prop_assert_eq!(result.cpp.employee_total, Decimal::ZERO);
        prop_assert_eq!(result.ei.employee_premium, Decimal::ZERO);
    }

    /// Monotonicity: increasing gross earnings never decreases federal or
    /// provincial withholding, and never decreases CPP or EI (below cap).
    #[test]
    fn increasing_earnings_never_decreases_withholding(
        gross_cents in 0u32..1_000_000u32,
        delta_cents in 1u32..50_000u32,
        jurisdiction in jurisdiction_strategy(),
    ) {
        let low = Decimal::new(gross_cents as i64, 2);
        let high = low + Decimal::new(delta_cents as i64, 2);
        let repo = TableRepository::new();
        let low_result = calculate_payroll(&repo, &request_with_gross(low, jurisdiction, PayFrequency::BiWeekly)).unwrap();
        let high_result = calculate_payroll(&repo, &request_with_gross(high, jurisdiction, PayFrequency::BiWeekly)).unwrap();

        prop_assert!(high_result.federal_tax.per_period_withholding >= low_result.federal_tax.per_period_withholding);
        prop_assert!(high_result.provincial_tax.per_period_withholding >= low_result.provincial_tax.per_period_withholding);
        prop_assert!(high_result.cpp.employee_total >= low_result.cpp.employee_total);
        prop_assert!(high_result.ei.employee_premium >= low_result.ei.employee_premium);
    }

    /// A zero-gross period with YTD below caps produces all-zero
    /// deductions and zero net pay.
    #[test]
    fn zero_earnings_period_is_idempotent(
        jurisdiction in jurisdiction_strategy(),
        frequency in frequency_strategy(),
    ) {
        let repo = TableRepository::new();
        let mut request = request_with_gross(Decimal::ZERO, jurisdiction, frequency);
        request.profile.rrsp_per_period = Decimal::ZERO;
        let result = calculate_payroll(&repo, &request).unwrap();
        prop_assert_eq!(result.cpp.employee_total, Decimal::ZERO);
        prop_assert_eq!(result.ei.employee_premium, Decimal::ZERO);
        prop_assert_eq!(result.federal_tax.per_period_withholding, Decimal::ZERO);
        prop_assert_eq!(result.provincial_tax.per_period_withholding, Decimal::ZERO);
        prop_assert_eq!(result.net_pay, Decimal::ZERO);
    }

    /// Cumulative contributions over a full year from YTD=0 never exceed
    /// the annual caps.
    #[test]
    fn cumulative_contributions_never_exceed_annual_caps(
        gross_cents in 100_000u32..2_000_000u32,
        jurisdiction in jurisdiction_strategy(),
    ) {
        let gross = Decimal::new(gross_cents as i64, 2);
        let repo = TableRepository::new();
        let cpp_ei = repo.load_cpp_ei(2025).unwrap();

        let mut ytd = YtdState::default();
        for period in 0..26u32 {
            let pay_date = if period < 13 { date(2025, 3, 15) } else { date(2025, 9, 15) };
            let mut request = request_with_gross(gross, jurisdiction, PayFrequency::BiWeekly);
            request.pay_date = pay_date;
            request.ytd = ytd;
            let result = calculate_payroll(&repo, &request).unwrap();

            ytd.ytd_cpp_base += result.cpp.base;
            ytd.ytd_cpp_additional += result.cpp.additional;
            ytd.ytd_ei_premium += result.ei.employee_premium;
            ytd.ytd_insurable += request.earnings.insurable();
            ytd.ytd_pensionable += request.earnings.pensionable();

            prop_assert!(ytd.ytd_cpp_base <= cpp_ei.max_base_annual);
            prop_assert!(ytd.ytd_cpp_additional <= cpp_ei.max_additional_annual);
            prop_assert!(ytd.ytd_ei_premium <= cpp_ei.ei.max_premium_annual);
        }
    }
}

/// Edition cut-over: identical requests but for `pay_date` straddling
/// July 1, 2025 produce different federal withholdings (not a property
/// test: deterministic pair, kept here alongside the other invariants).
#[test]
fn edition_cutover_changes_federal_withholding() {
    let repo = TableRepository::new();
    let mut before = request_with_gross(dec!(4000.00), Jurisdiction::ON, PayFrequency::Monthly);
    before.pay_date = date(2025, 6, 30);
    let mut after = request_with_gross(dec!(4000.00), Jurisdiction::ON, PayFrequency::Monthly);
    after.pay_date = date(2025, 7, 1);

    let before_result = calculate_payroll(&repo, &before).unwrap();
    let after_result = calculate_payroll(&repo, &after).unwrap();
    assert_ne!(
        before_result.federal_tax.per_period_withholding,
        after_result.federal_tax.per_period_withholding
    );
}
