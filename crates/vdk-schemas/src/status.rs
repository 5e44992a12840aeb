use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// How a project is voiced. Which styles route to the external coordination
/// queue at intake is configuration (`scheduling.coordination_styles`), not a
/// property of the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationStyle {
    Solo,
    Duet,
    DualPov,
    FullCast,
}

impl NarrationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationStyle::Solo => "solo",
            NarrationStyle::Duet => "duet",
            NarrationStyle::DualPov => "dual_pov",
            NarrationStyle::FullCast => "full_cast",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(NarrationStyle::Solo),
            "duet" => Ok(NarrationStyle::Duet),
            "dual_pov" | "dual-pov" | "dual" => Ok(NarrationStyle::DualPov),
            "full_cast" | "full-cast" | "multicast" => Ok(NarrationStyle::FullCast),
            other => Err(anyhow!(
                "invalid narration style '{}'. expected one of: solo | duet | dual_pov | full_cast",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Author,
    Publisher,
    Studio,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Author => "author",
            ClientType::Publisher => "publisher",
            ClientType::Studio => "studio",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(ClientType::Author),
            "publisher" => Ok(ClientType::Publisher),
            "studio" => Ok(ClientType::Studio),
            other => Err(anyhow!(
                "invalid client type '{}'. expected one of: author | publisher | studio",
                other
            )),
        }
    }
}

/// Booking lifecycle status.
///
/// A closed enum with an explicit transition table, replacing the free-text
/// status strings the hosted store tolerates. Every status write goes through
/// [`BookingStatus::can_follow`]; the set of reachable transitions matches
/// what the operator UI exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Fresh solo-style intake awaiting operator review.
    Pending,
    /// Fresh intake in a coordination style; queued for external casting
    /// coordination instead of the narrator's own pipeline.
    PendingCoordination,
    Onboarding,
    /// First-15-minutes sample recorded and sent for client approval.
    FirstFifteen,
    Production,
    Invoiced,
    Paid,
    Archived,
    Postponed,
    OnHold,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::PendingCoordination => "pending_coordination",
            BookingStatus::Onboarding => "onboarding",
            BookingStatus::FirstFifteen => "first_fifteen",
            BookingStatus::Production => "production",
            BookingStatus::Invoiced => "invoiced",
            BookingStatus::Paid => "paid",
            BookingStatus::Archived => "archived",
            BookingStatus::Postponed => "postponed",
            BookingStatus::OnHold => "on_hold",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "pending_coordination" => Ok(BookingStatus::PendingCoordination),
            "onboarding" => Ok(BookingStatus::Onboarding),
            "first_fifteen" => Ok(BookingStatus::FirstFifteen),
            "production" => Ok(BookingStatus::Production),
            "invoiced" => Ok(BookingStatus::Invoiced),
            "paid" => Ok(BookingStatus::Paid),
            "archived" => Ok(BookingStatus::Archived),
            "postponed" => Ok(BookingStatus::Postponed),
            "on_hold" => Ok(BookingStatus::OnHold),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(anyhow!("invalid booking status: {}", other)),
        }
    }

    /// Statuses a booking may be in immediately before moving to `self`.
    ///
    /// An empty slice means the status is only reachable as an initial value
    /// (`Pending` / `PendingCoordination` are set by intake, never by a
    /// transition — except `Postponed → Pending` for a reschedule).
    pub fn valid_predecessors(&self) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match self {
            Pending => &[Postponed],
            PendingCoordination => &[],
            Onboarding => &[Pending, PendingCoordination, OnHold],
            FirstFifteen => &[Onboarding, OnHold],
            Production => &[FirstFifteen, OnHold],
            Invoiced => &[Production],
            Paid => &[Invoiced],
            Archived => &[Paid, Rejected],
            Postponed => &[Pending, PendingCoordination, Onboarding, FirstFifteen, Production],
            OnHold => &[Pending, PendingCoordination, Onboarding, FirstFifteen, Production],
            Rejected => &[Pending, PendingCoordination],
        }
    }

    /// True iff a single-field status write `prev → self` is legal.
    pub fn can_follow(&self, prev: BookingStatus) -> bool {
        self.valid_predecessors().contains(&prev)
    }

    /// No transitions lead out of a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Archived)
    }
}
