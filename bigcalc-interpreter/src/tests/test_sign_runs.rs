//! Long runs of signs must follow parity: an odd number of minus signs is a
//! subtraction, an even number is an addition.

use crate::normalizer::normalize;
use crate::test_harness::CalculatorTestHarness;

#[test]
fn test_short_runs() {
    let mut harness = CalculatorTestHarness::new();

    harness.assert_evaluates_to_integer("5---2", 3).unwrap();
    harness.assert_evaluates_to_integer("5--2", 7).unwrap();
    harness.assert_evaluates_to_integer("5 +++ 2", 7).unwrap();
    harness.assert_evaluates_to_integer("5 +- 2", 3).unwrap();
    harness.assert_evaluates_to_integer("5 ++-- 2", 7).unwrap();
}

#[test]
fn test_runs_of_every_length_follow_parity() {
    let mut harness = CalculatorTestHarness::new();

    for length in 1..=16 {
        let line = format!("10{}3", "-".repeat(length));
        let expected = if length % 2 == 1 { 7 } else { 13 };
        harness
            .assert_evaluates_to_integer(&line, expected)
            .unwrap_or_else(|error| panic!("{line}: {error}"));
    }
}

#[test]
fn test_runs_separated_by_whitespace() {
    let mut harness = CalculatorTestHarness::new();

    harness.assert_evaluates_to_integer("9 - - - 4", 5).unwrap();
    harness.assert_evaluates_to_integer("9 - - 4", 13).unwrap();
    harness
        .assert_evaluates_to_integer("1 +++ 2 * 3 -- 4", 11)
        .unwrap();
}

#[test]
fn test_normalized_stream_has_single_signs() {
    for length in 1..=12 {
        let stream = normalize(&format!("1 {} 2", "-".repeat(length)));
        assert!(
            stream == "1-2" || stream == "1+2",
            "{length} signs normalized to {stream}"
        );
    }
}
