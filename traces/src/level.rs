//! Trace severity levels and their badge display metadata.

#[cfg(test)]
#[path = "level_test.rs"]
mod level_test;

use serde::{Deserialize, Serialize};

/// Severity of the most severe observation recorded under a trace.
///
/// Ordering is by severity: `Debug < Default < Warning < Error`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceLevel {
    Debug,
    #[default]
    Default,
    Warning,
    Error,
}

impl TraceLevel {
    /// All levels, in ascending severity order.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Default, Self::Warning, Self::Error];

    /// Parse the wire form (case-insensitive). Returns `None` for unknown
    /// level strings — callers decide whether that is an error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "DEFAULT" => Some(Self::Default),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Canonical wire form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Default => "DEFAULT",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Numeric severity rank used for `>=` filtering.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Default => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    /// Levels whose severity is at or above `min`, in ascending order.
    ///
    /// The server expands a `level >= min` predicate into this set so the
    /// generated SQL stays a plain `= ANY(...)` membership test.
    #[must_use]
    pub fn at_or_above(min: Self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|l| l.rank() >= min.rank()).collect()
    }
}

/// Badge rendering metadata for a severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDisplay {
    pub label: &'static str,
    pub color: &'static str,
}

/// Look up the badge label and color for a level.
#[must_use]
pub fn level_display(level: TraceLevel) -> LevelDisplay {
    match level {
        TraceLevel::Debug => LevelDisplay { label: "DEBUG", color: "#888888" },
        TraceLevel::Default => LevelDisplay { label: "DEFAULT", color: "#5b9bd5" },
        TraceLevel::Warning => LevelDisplay { label: "WARNING", color: "#e6a23c" },
        TraceLevel::Error => LevelDisplay { label: "ERROR", color: "#e05d5d" },
    }
}
