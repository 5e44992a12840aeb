/// Convert a manuscript word count into whole production days:
/// `ceil(word_count / words_per_day)`.
///
/// A non-positive word count yields 0, explicitly zero rather than one: the
/// UI treats "no word count yet" as "no estimate yet", which is distinct
/// from a one-day minimum. Any positive count yields at least 1.
///
/// `words_per_day` comes from validated configuration and is always > 0.
pub fn production_days(word_count: i64, words_per_day: i64) -> i64 {
    debug_assert!(words_per_day > 0, "words_per_day must be positive");
    if word_count <= 0 || words_per_day <= 0 {
        return 0;
    }
    word_count.saturating_add(words_per_day - 1) / words_per_day
}
