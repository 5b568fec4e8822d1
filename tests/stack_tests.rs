// ===== cardforge/tests/stack_tests.rs =====
use cardforge::layout::BlockStack;
use rstest::rstest;

#[rstest]
#[case(0, 3, 2, 0, 0)]
#[case(1, 3, 2, 1, 0)]
#[case(3, 3, 2, 3, 0)]
#[case(4, 3, 2, 3, 1)]
#[case(5, 3, 2, 3, 2)]
#[case(7, 3, 2, 3, 2)] // 2 units dropped silently
#[case(10, 1, 0, 1, 0)]
#[case(4, 0, 2, 0, 2)]
fn packing_follows_first_fit(
    #[case] n: u32,
    #[case] max_full: u32,
    #[case] max_short: u32,
    #[case] expected_full: u32,
    #[case] expected_short: u32,
) {
    let mut stack = BlockStack::new();
    stack.set_limits(max_full, max_short);
    stack.add_units(n);

    let counts = stack.counts();
    assert_eq!(counts.full, expected_full, "full count mismatch for n={n}");
    assert_eq!(counts.short, expected_short, "short count mismatch for n={n}");
}

#[test]
fn add_unit_matches_add_units() {
    let mut a = BlockStack::new();
    let mut b = BlockStack::new();
    a.add_units(4);
    for _ in 0..4 {
        b.add_unit();
    }
    assert_eq!(a.counts(), b.counts());
}

#[test]
fn default_ceilings_are_three_and_two() {
    let mut stack = BlockStack::new();
    stack.add_units(100);
    let counts = stack.counts();
    assert_eq!((counts.full, counts.short), (3, 2));
}

#[test]
fn reset_then_repeat_is_idempotent() {
    let mut stack = BlockStack::new();
    stack.set_limits(3, 2);
    stack.add_units(4);
    let first = stack.counts();

    stack.reset();
    stack.add_units(4);
    assert_eq!(stack.counts(), first, "reset must restore a clean packer");
}

#[test]
fn reset_keeps_configured_limits() {
    let mut stack = BlockStack::new();
    stack.set_limits(1, 1);
    stack.add_units(5);
    stack.reset();
    stack.add_units(5);
    let counts = stack.counts();
    assert_eq!((counts.full, counts.short), (1, 1));
}
