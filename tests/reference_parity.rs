//! Curated reference-parity corpus (spec §8): the seven concrete
//! end-to-end scenarios plus one case per jurisdiction, reproduced
//! against the July 2025 / 121st edition tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cdn_payroll_core::{
    calculate_payroll, EmployeeTaxProfile, Jurisdiction, PayFrequency, PayrollRequest, PeriodEarnings, TableRepository, YtdState,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn earnings(gross: Decimal) -> PeriodEarnings {
    PeriodEarnings {
        gross_regular: gross,
        ..PeriodEarnings::default()
    }
}

/// A provincial claim amount safe against every jurisdiction's static BPA
/// floor (Alberta's $21,885 is the highest) for scenarios that aren't
/// jurisdiction-specific. Scenario 1 overrides this to Ontario's worked
/// $12,747 example, which clears Ontario's own (lower) floor.
fn base_profile() -> EmployeeTaxProfile {
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

/// Scenario 1: Ontario, bi-weekly, $2,307.69 gross, TC=$16,129,
/// TCP=$12,747, RRSP=$100, all YTD=0, not exempt.
#[test]
fn scenario_1_ontario_biweekly() {
    let repo = TableRepository::new();
    let mut profile = base_profile();
    profile.rrsp_per_period = dec!(100.00);
    profile.provincial_claim_amount = dec!(12747.00);

    let request = PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency: PayFrequency::BiWeekly,
        jurisdiction: Jurisdiction::ON,
        profile,
        earnings: earnings(dec!(2307.69)),
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let result = calculate_payroll(&repo, &request).expect("scenario 1 calculates");

    assert_eq!(result.ei.employee_premium, dec!(37.85));
    assert!(result.cpp.base > Decimal::ZERO);
    assert!(result.federal_tax.per_period_withholding > Decimal::ZERO);
    assert!(result.provincial_tax.per_period_withholding > Decimal::ZERO);

    let expected_net = dec!(2307.69)
        - result.cpp.employee_total
        - result.ei.employee_premium
        - result.federal_tax.per_period_withholding
        - result.provincial_tax.per_period_withholding
        - dec!(100.00);
    assert_eq!(result.net_pay, expected_net);
}

/// Scenario 2: Alberta, bi-weekly, $3,500 gross, claim amounts such that
/// K1P+K2P = $4,000 -> K5P = (4000-3600)*(0.04/0.06) = $266.67.
#[test]
fn scenario_2_alberta_k5p() {
    let repo = TableRepository::new();
    let mut profile = base_profile();
    // AB's lowest bracket rate is 0.10, so claim=40000 -> K1P = 4000 exactly
    // with zero CPP/EI credit contribution.
    profile.provincial_claim_amount = dec!(40000.00);
    profile.is_cpp_exempt = true;
    profile.is_ei_exempt = true;

    let request = PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency: PayFrequency::BiWeekly,
        jurisdiction: Jurisdiction::AB,
        profile,
        earnings: earnings(dec!(3500.00)),
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let result = calculate_payroll(&repo, &request).expect("scenario 2 calculates");
    let k5p = result
        .provincial_tax
        .credits
        .k5p
        .expect("alberta always reports k5p");
    assert_eq!(cdn_payroll_core::money::round2(k5p), dec!(266.67));
}

/// Scenario 4: any jurisdiction, `isCppExempt = true`, gross = $4,000:
/// CPP base = CPP2 = F2 = employer = 0; EI and taxes still computed; the
/// K2 credits use zero for the CPP component.
#[test]
fn scenario_4_cpp_exempt_zeroes_cpp_but_not_tax() {
    let repo = TableRepository::new();
    let profile = base_profile();

    let request = PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency: PayFrequency::Monthly,
        jurisdiction: Jurisdiction::SK,
        profile: EmployeeTaxProfile { is_cpp_exempt: true, ..profile },
        earnings: earnings(dec!(4000.00)),
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let result = calculate_payroll(&repo, &request).expect("scenario 4 calculates");
    assert_eq!(result.cpp.base, Decimal::ZERO);
    assert_eq!(result.cpp.additional, Decimal::ZERO);
    assert_eq!(result.cpp.enhancement_f2, Decimal::ZERO);
    assert_eq!(result.cpp.employer_total, Decimal::ZERO);
    assert_eq!(result.federal_tax.credits.k2, Decimal::ZERO);
    assert_eq!(result.provincial_tax.credits.k2, Decimal::ZERO);
    assert!(result.ei.employee_premium > Decimal::ZERO);
    assert!(result.federal_tax.per_period_withholding > Decimal::ZERO);
}

/// Scenario 5: Ontario, monthly, gross = $10,000, YTD cpp_base = cap -
/// $50: CPP base this period = exactly $50.
#[test]
fn scenario_5_cpp_base_trimmed_to_remaining_cap() {
    let repo = TableRepository::new();
    let cpp_ei = repo.load_cpp_ei(2025).unwrap();
    let profile = base_profile();

    let request = PayrollRequest {
        pay_date: date(2025, 11, 1),
        frequency: PayFrequency::Monthly,
        jurisdiction: Jurisdiction::ON,
        profile,
        earnings: earnings(dec!(10000.00)),
        ytd: YtdState {
            ytd_cpp_base: cpp_ei.max_base_annual - dec!(50.00),
            ..YtdState::default()
        },
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let result = calculate_payroll(&repo, &request).expect("scenario 5 calculates");
    assert_eq!(result.cpp.base, dec!(50.00));
}

/// Scenario 6: any jurisdiction, `isCpp2Exempt = true`, period earnings
/// $6,500 when YMPE/P = $5,933: additional CPP = $0, base CPP normal.
#[test]
fn scenario_6_cpp2_exempt_zeroes_additional_only() {
    let repo = TableRepository::new();
    let profile = base_profile();

    let request = PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency: PayFrequency::BiWeekly,
        jurisdiction: Jurisdiction::NB,
        profile: EmployeeTaxProfile { is_cpp2_exempt: true, ..profile },
        earnings: earnings(dec!(6500.00)),
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let result = calculate_payroll(&repo, &request).expect("scenario 6 calculates");
    assert_eq!(result.cpp.additional, Decimal::ZERO);
    assert!(result.cpp.base > Decimal::ZERO);
}

/// Scenario 7: CPT30 elected mid-year. Two bi-weekly calls, same gross
/// above YMPE/P: first with the flag false has CPP2 > 0, second with the
/// flag true has CPP2 = 0.
#[test]
fn scenario_7_cpt30_election_mid_year() {
    let repo = TableRepository::new();
    let profile = base_profile();
    let mk = |cpp2_exempt: bool| PayrollRequest {
        pay_date: date(2025, 7, 15),
        frequency: PayFrequency::BiWeekly,
        jurisdiction: Jurisdiction::MB,
        profile: EmployeeTaxProfile { is_cpp2_exempt: cpp2_exempt, ..profile.clone() },
        earnings: earnings(dec!(6500.00)),
        ytd: YtdState::default(),
        other_pre_tax_k3_per_period: dec!(0),
        other_post_tax_per_period: dec!(0),
    };

    let before = calculate_payroll(&repo, &mk(false)).unwrap();
    let after = calculate_payroll(&repo, &mk(true)).unwrap();
    assert!(before.cpp.additional > Decimal::ZERO);
    assert_eq!(after.cpp.additional, Decimal::ZERO);
}

/// One smoke case per jurisdiction, all four frequencies, both editions:
/// the engine must produce a non-negative, reconciling result everywhere
/// in the closed 12-jurisdiction set without error.
#[test]
fn smoke_all_jurisdictions_all_frequencies_both_editions() {
    let repo = TableRepository::new();
    let frequencies = [
        PayFrequency::Weekly,
        PayFrequency::BiWeekly,
        PayFrequency::SemiMonthly,
        PayFrequency::Monthly,
    ];
    let pay_dates = [date(2025, 3, 15), date(2025, 9, 15)];

    for jurisdiction in Jurisdiction::ALL {
        for frequency in frequencies {
            for pay_date in pay_dates {
                let request = PayrollRequest {
                    pay_date,
                    frequency,
                    jurisdiction,
                    profile: base_profile(),
                    earnings: earnings(dec!(3000.00)),
                    ytd: YtdState::default(),
                    other_pre_tax_k3_per_period: dec!(0),
                    other_post_tax_per_period: dec!(0),
                };
                let result = calculate_payroll(&repo, &request)
                    .unwrap_or_else(|e| panic!("{jurisdiction} {frequency:?} {pay_date} failed: {e}"));
                assert!(result.net_pay >= Decimal::ZERO);
                assert!(result.total_employee_deductions >= Decimal::ZERO);
            }
        }
    }
}
