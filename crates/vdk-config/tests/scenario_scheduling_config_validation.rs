//! Scenario: typed scheduling config extraction and validation.
//!
//! # Invariants under test
//!
//! 1. Missing keys fall back to the observed production values.
//! 2. Present keys are parsed into typed values.
//! 3. A tier table that isn't strictly descending refuses to load, as does
//!    a non-positive words-per-day.

use vdk_config::{load_layered_yaml_from_strings, SchedulingConfig};
use vdk_schemas::{BookingStatus, NarrationStyle};

fn scheduling_from(yaml: &str) -> anyhow::Result<SchedulingConfig> {
    load_layered_yaml_from_strings(&[yaml])?.scheduling()
}

// ---------------------------------------------------------------------------
// 1. Defaults
// ---------------------------------------------------------------------------

#[test]
fn empty_config_yields_observed_defaults() {
    let cfg = scheduling_from("{}").unwrap();

    assert_eq!(cfg.words_per_day, 6975);
    assert_eq!(cfg.discount_tiers.len(), 4);
    assert_eq!(cfg.discount_tiers[0].min_days_out, 120);
    assert_eq!(cfg.discount_tiers[0].label, "8%");
    assert_eq!(cfg.discount_tiers[3].min_days_out, 30);
    assert_eq!(cfg.discount_tiers[3].label, "5%");
    assert!(cfg.coordination_styles.contains(&NarrationStyle::FullCast));
    assert!(cfg
        .non_blocking_statuses
        .contains(&BookingStatus::PendingCoordination));
}

#[test]
fn defaults_validate() {
    // sane_defaults must always pass its own validation path.
    let cfg = SchedulingConfig::sane_defaults();
    let reparsed = scheduling_from("{}").unwrap();
    assert_eq!(cfg, reparsed);
}

// ---------------------------------------------------------------------------
// 2. Typed extraction
// ---------------------------------------------------------------------------

#[test]
fn present_keys_override_defaults() {
    let yaml = r#"
scheduling:
  words_per_day: 5000
  discount_tiers:
    - { min_days_out: 45, label: "10%" }
    - { min_days_out: 14, label: "3%" }
  coordination_styles: ["duet"]
  non_blocking_statuses: ["rejected", "archived"]
"#;
    let cfg = scheduling_from(yaml).unwrap();

    assert_eq!(cfg.words_per_day, 5000);
    assert_eq!(cfg.discount_tiers.len(), 2);
    assert_eq!(cfg.discount_tiers[1].label, "3%");
    assert_eq!(cfg.coordination_styles, vec![NarrationStyle::Duet]);
    assert_eq!(
        cfg.non_blocking_statuses,
        vec![BookingStatus::Rejected, BookingStatus::Archived]
    );
}

#[test]
fn initial_status_routes_by_configured_style_list() {
    let cfg = scheduling_from("{}").unwrap();
    assert_eq!(
        cfg.initial_status(NarrationStyle::Solo),
        BookingStatus::Pending
    );
    assert_eq!(
        cfg.initial_status(NarrationStyle::FullCast),
        BookingStatus::PendingCoordination
    );

    // An empty coordination list routes everything to the solo queue.
    let none = scheduling_from("scheduling: { coordination_styles: [] }").unwrap();
    assert_eq!(
        none.initial_status(NarrationStyle::FullCast),
        BookingStatus::Pending
    );
}

// ---------------------------------------------------------------------------
// 3. Validation refusals
// ---------------------------------------------------------------------------

#[test]
fn non_descending_tiers_refuse_to_load() {
    let yaml = r#"
scheduling:
  discount_tiers:
    - { min_days_out: 60, label: "6%" }
    - { min_days_out: 90, label: "7%" }
"#;
    let err = scheduling_from(yaml).unwrap_err();
    assert!(
        err.to_string().contains("strictly descending"),
        "got: {err}"
    );
}

#[test]
fn duplicate_thresholds_refuse_to_load() {
    let yaml = r#"
scheduling:
  discount_tiers:
    - { min_days_out: 60, label: "6%" }
    - { min_days_out: 60, label: "5%" }
"#;
    assert!(scheduling_from(yaml).is_err());
}

#[test]
fn zero_words_per_day_refuses_to_load() {
    let err = scheduling_from("scheduling: { words_per_day: 0 }").unwrap_err();
    assert!(err.to_string().contains("words_per_day"));
}

#[test]
fn non_positive_threshold_refuses_to_load() {
    let yaml = r#"
scheduling:
  discount_tiers:
    - { min_days_out: 0, label: "1%" }
"#;
    assert!(scheduling_from(yaml).is_err());
}

#[test]
fn duplicate_labels_refuse_to_load() {
    let yaml = r#"
scheduling:
  discount_tiers:
    - { min_days_out: 90, label: "5%" }
    - { min_days_out: 30, label: "5%" }
"#;
    let err = scheduling_from(yaml).unwrap_err();
    assert!(err.to_string().contains("unique"), "got: {err}");
}

#[test]
fn unknown_style_refuses_to_load() {
    let yaml = r#"
scheduling:
  coordination_styles: ["choir"]
"#;
    assert!(scheduling_from(yaml).is_err());
}
