use anyhow::{bail, Context, Result};
use serde_json::Value;
use vdk_schemas::{BookingStatus, DiscountTier, NarrationStyle};

/// Typed scheduling configuration, extracted from the merged config JSON.
///
/// Consumed pointers:
/// - `/scheduling/words_per_day`
/// - `/scheduling/discount_tiers`
/// - `/scheduling/coordination_styles`
/// - `/scheduling/non_blocking_statuses`
///
/// Missing keys fall back to the observed production values; present keys
/// are validated, and a config that fails validation refuses to load.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingConfig {
    /// Narration throughput used to derive production days from a word
    /// count.
    pub words_per_day: i64,
    /// Advance-booking tiers, strictly descending in `min_days_out`.
    pub discount_tiers: Vec<DiscountTier>,
    /// Styles routed to the external coordination queue at intake.
    pub coordination_styles: Vec<NarrationStyle>,
    /// Statuses whose bookings do not block the calendar.
    pub non_blocking_statuses: Vec<BookingStatus>,
}

impl SchedulingConfig {
    pub fn sane_defaults() -> Self {
        Self {
            words_per_day: 6975,
            discount_tiers: vec![
                DiscountTier::new(120, "8%"),
                DiscountTier::new(90, "7%"),
                DiscountTier::new(60, "6%"),
                DiscountTier::new(30, "5%"),
            ],
            coordination_styles: vec![NarrationStyle::FullCast, NarrationStyle::Duet],
            non_blocking_statuses: vec![
                BookingStatus::PendingCoordination,
                BookingStatus::Rejected,
                BookingStatus::Postponed,
                BookingStatus::Archived,
            ],
        }
    }

    pub fn from_config_json(config: &Value) -> Result<Self> {
        let defaults = Self::sane_defaults();

        let words_per_day = match config.pointer("/scheduling/words_per_day") {
            None | Some(Value::Null) => defaults.words_per_day,
            Some(v) => v
                .as_i64()
                .context("scheduling.words_per_day must be an integer")?,
        };

        let discount_tiers = match config.pointer("/scheduling/discount_tiers") {
            None | Some(Value::Null) => defaults.discount_tiers,
            Some(v) => parse_tiers(v)?,
        };

        let coordination_styles = match config.pointer("/scheduling/coordination_styles") {
            None | Some(Value::Null) => defaults.coordination_styles,
            Some(v) => parse_styles(v)?,
        };

        let non_blocking_statuses = match config.pointer("/scheduling/non_blocking_statuses") {
            None | Some(Value::Null) => defaults.non_blocking_statuses,
            Some(v) => parse_statuses(v)?,
        };

        Self {
            words_per_day,
            discount_tiers,
            coordination_styles,
            non_blocking_statuses,
        }
        .validated()
    }

    /// Initial status for a freshly validated intake: coordination styles go
    /// to the external casting queue, everything else enters the narrator's
    /// own pipeline.
    pub fn initial_status(&self, style: NarrationStyle) -> BookingStatus {
        if self.coordination_styles.contains(&style) {
            BookingStatus::PendingCoordination
        } else {
            BookingStatus::Pending
        }
    }

    fn validated(self) -> Result<Self> {
        if self.words_per_day <= 0 {
            bail!(
                "scheduling.words_per_day must be > 0, got {}",
                self.words_per_day
            );
        }

        let mut prev: Option<i64> = None;
        for t in &self.discount_tiers {
            if t.min_days_out <= 0 {
                bail!(
                    "discount tier '{}' has non-positive min_days_out {}",
                    t.label,
                    t.min_days_out
                );
            }
            if t.label.trim().is_empty() {
                bail!("discount tier at {} days out has an empty label", t.min_days_out);
            }
            if let Some(p) = prev {
                if t.min_days_out >= p {
                    bail!(
                        "discount tiers must be strictly descending in min_days_out ({} then {})",
                        p,
                        t.min_days_out
                    );
                }
            }
            prev = Some(t.min_days_out);
        }

        let mut labels: Vec<&str> = self.discount_tiers.iter().map(|t| t.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        if labels.len() != self.discount_tiers.len() {
            bail!("discount tier labels must be unique");
        }

        Ok(self)
    }
}

fn parse_tiers(v: &Value) -> Result<Vec<DiscountTier>> {
    let arr = v
        .as_array()
        .context("scheduling.discount_tiers must be an array")?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let min_days_out = item
            .pointer("/min_days_out")
            .and_then(Value::as_i64)
            .context("discount tier entry is missing integer min_days_out")?;
        let label = item
            .pointer("/label")
            .and_then(Value::as_str)
            .context("discount tier entry is missing string label")?
            .to_string();
        out.push(DiscountTier {
            min_days_out,
            label,
        });
    }
    Ok(out)
}

fn parse_styles(v: &Value) -> Result<Vec<NarrationStyle>> {
    let arr = v
        .as_array()
        .context("scheduling.coordination_styles must be an array")?;
    arr.iter()
        .map(|item| {
            let s = item
                .as_str()
                .context("coordination_styles entries must be strings")?;
            NarrationStyle::parse(s)
        })
        .collect()
}

fn parse_statuses(v: &Value) -> Result<Vec<BookingStatus>> {
    let arr = v
        .as_array()
        .context("scheduling.non_blocking_statuses must be an array")?;
    arr.iter()
        .map(|item| {
            let s = item
                .as_str()
                .context("non_blocking_statuses entries must be strings")?;
            BookingStatus::parse(s)
        })
        .collect()
}
