//! Scenario: word count → production days rounding.
//!
//! # Invariants under test
//!
//! 1. `production_days(w, wpd) == ceil(w / wpd)` for all positive `w`.
//! 2. A non-positive word count yields 0 days — "no estimate yet", not a
//!    one-day minimum.
//! 3. Any positive word count yields at least 1 day.

use vdk_scheduling::production_days;

const WORDS_PER_DAY: i64 = 6975;

// ---------------------------------------------------------------------------
// 1. Observed production value: 50k words at 6975 wpd is 8 days
// ---------------------------------------------------------------------------

#[test]
fn fifty_thousand_words_is_eight_days() {
    assert_eq!(production_days(50_000, WORDS_PER_DAY), 8);
}

// ---------------------------------------------------------------------------
// 2. Exact multiples do not round up an extra day
// ---------------------------------------------------------------------------

#[test]
fn exact_multiple_is_not_rounded_up() {
    assert_eq!(production_days(WORDS_PER_DAY, WORDS_PER_DAY), 1);
    assert_eq!(production_days(WORDS_PER_DAY * 4, WORDS_PER_DAY), 4);
}

#[test]
fn one_word_over_a_multiple_adds_a_day() {
    assert_eq!(production_days(WORDS_PER_DAY + 1, WORDS_PER_DAY), 2);
    assert_eq!(production_days(WORDS_PER_DAY * 4 + 1, WORDS_PER_DAY), 5);
}

// ---------------------------------------------------------------------------
// 3. Zero / negative word counts mean "no estimate yet"
// ---------------------------------------------------------------------------

#[test]
fn zero_word_count_is_zero_days() {
    assert_eq!(
        production_days(0, WORDS_PER_DAY),
        0,
        "empty word count must be 0 days, not a 1-day minimum"
    );
}

#[test]
fn negative_word_count_is_zero_days() {
    assert_eq!(production_days(-5_000, WORDS_PER_DAY), 0);
}

// ---------------------------------------------------------------------------
// 4. Any positive count is at least one day
// ---------------------------------------------------------------------------

#[test]
fn tiny_positive_word_count_is_one_day() {
    assert_eq!(production_days(1, WORDS_PER_DAY), 1);
    assert_eq!(production_days(500, WORDS_PER_DAY), 1);
}

// ---------------------------------------------------------------------------
// 5. Ceiling identity over a sweep
// ---------------------------------------------------------------------------

#[test]
fn matches_ceiling_identity_across_a_sweep() {
    for w in (1..=60_000).step_by(973) {
        let expected = (w + WORDS_PER_DAY - 1) / WORDS_PER_DAY;
        assert_eq!(
            production_days(w, WORDS_PER_DAY),
            expected,
            "ceil mismatch at word_count={w}"
        );
    }
}
