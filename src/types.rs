//! Shared identifier alias and attendance enums.

use serde::{Deserialize, Serialize};

/// Timestamp-derived record identifier.
pub type RsvpId = String;

/// Guest attendance answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    /// The guest will attend.
    Yes,
    /// The guest will not attend.
    No,
    /// The guest is undecided.
    Maybe,
}

impl Attendance {
    /// Lowercase token used in the persisted layout, the CSV export, and the
    /// mirror payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Maybe => "maybe",
        }
    }

    /// Parses a lowercase attendance token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "maybe" => Some(Self::Maybe),
            _ => None,
        }
    }
}

/// Admin-view attendance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceFilter {
    /// No attendance restriction.
    #[default]
    All,
    /// Only attending responses.
    Yes,
    /// Only declined responses.
    No,
    /// Only undecided responses.
    Maybe,
}

impl AttendanceFilter {
    /// True when `attendance` passes this filter.
    pub fn admits(self, attendance: Attendance) -> bool {
        match self {
            Self::All => true,
            Self::Yes => attendance == Attendance::Yes,
            Self::No => attendance == Attendance::No,
            Self::Maybe => attendance == Attendance::Maybe,
        }
    }

    /// Parses a filter-button token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "maybe" => Some(Self::Maybe),
            _ => None,
        }
    }
}
