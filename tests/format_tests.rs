// ===== cardforge/tests/format_tests.rs =====
use cardforge::format::{
    adaptive, classify_delta, classify_league, delta_percent, value_add_plus, winrate, League,
    ValueClass,
};
use rstest::rstest;

#[test]
fn adaptive_keeps_zero_visible() {
    assert_eq!(adaptive(0.0), "0");
}

#[rstest]
#[case(532.0, "532")]
#[case(-42.0, "-42")]
#[case(1.57, "1.57")]
#[case(9999.0, "9999")]
#[case(15_400.0, "15.4K")]
#[case(105_000.0, "105K")]
#[case(4_350_000.0, "4.35M")]
#[case(-1_200_000.0, "-1.20M")]
fn adaptive_magnitude_policy(#[case] input: f64, #[case] expected: &str) {
    assert_eq!(adaptive(input), expected);
}

#[test]
fn winrate_is_percent_with_two_decimals() {
    assert_eq!(winrate(0.5421), "54.21%");
    assert_eq!(winrate(0.0), "0.00%");
    assert_eq!(winrate(1.0), "100.00%");
}

#[test]
fn sign_rules_have_no_double_sign() {
    assert_eq!(value_add_plus(0.0), "");
    assert_eq!(value_add_plus(5.0), "+5");
    assert_eq!(value_add_plus(-3.0), "-3");
    assert_eq!(delta_percent(0.0), "");
    assert_eq!(delta_percent(0.031), "+3.10%");
    assert_eq!(delta_percent(-0.031), "-3.10%");
}

#[test]
fn formatters_accept_contract_inputs() {
    // Contract: zero, small positive/negative integers and a fraction must
    // never panic in any formatter.
    for x in [0.0, 7.0, -7.0, 0.25] {
        let _ = adaptive(x);
        let _ = winrate(x);
        let _ = value_add_plus(x);
        let _ = delta_percent(x);
    }
}

#[test]
fn delta_classification() {
    assert_eq!(classify_delta(3.0, false), ValueClass::Positive);
    assert_eq!(classify_delta(-3.0, false), ValueClass::Negative);
    assert_eq!(classify_delta(0.0, false), ValueClass::Neutral);
    // Lower leaderboard position is an improvement.
    assert_eq!(classify_delta(-3.0, true), ValueClass::Positive);
    assert_eq!(classify_delta(3.0, true), ValueClass::Negative);
}

#[rstest]
#[case(2999.0, 0, League::NoLeague)]
#[case(3000.0, 0, League::Gold)]
#[case(3999.0, 0, League::Gold)]
#[case(4000.0, 0, League::Platinum)]
#[case(4999.0, 0, League::Platinum)]
#[case(5000.0, 0, League::Brilliant)]
#[case(6000.0, 3, League::Calibration)]
fn league_boundaries(#[case] rating: f64, #[case] calibration: u32, #[case] expected: League) {
    assert_eq!(classify_league(rating, calibration), expected);
}
