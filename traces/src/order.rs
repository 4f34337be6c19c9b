//! Single-column order-by state.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// The active sort specification. Single column only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self { column: column.into(), direction }
    }

    /// Header-click cycle: a fresh column starts at `Desc` (newest/largest
    /// first), a second click flips to `Asc`, a third clears the sort.
    #[must_use]
    pub fn cycle(current: Option<&Self>, column: &str) -> Option<Self> {
        match current {
            Some(order) if order.column == column => match order.direction {
                SortDirection::Desc => Some(Self::new(column, SortDirection::Asc)),
                SortDirection::Asc => None,
            },
            _ => Some(Self::new(column, SortDirection::Desc)),
        }
    }

    /// URL form: `column.asc` / `column.desc`.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}.{}", self.column, self.direction.as_str())
    }

    /// Parse the URL form. Returns `None` for malformed input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (column, direction) = raw.rsplit_once('.')?;
        if column.is_empty() {
            return None;
        }
        Some(Self::new(column, SortDirection::parse(direction)?))
    }
}
