use chrono::NaiveDate;
use vdk_schemas::DiscountTier;

use crate::dates::days_between;

/// Pick the discount tier for a candidate start date: the highest
/// `min_days_out` threshold satisfied by `days_between(today, start)` wins.
///
/// Returns `None` when no threshold qualifies, including same-day starts
/// (days-out 0) and past starts (negative days-out never reaches a positive
/// threshold). The tier table does not need to be pre-sorted; selection is
/// by maximum qualifying threshold, not list order.
pub fn select_tier<'a>(
    today: NaiveDate,
    start: NaiveDate,
    tiers: &'a [DiscountTier],
) -> Option<&'a DiscountTier> {
    let days_out = days_between(today, start);
    tiers
        .iter()
        .filter(|t| days_out >= t.min_days_out)
        .max_by_key(|t| t.min_days_out)
}
