//! Filter predicates and the user-editable filter list.
//!
//! DESIGN
//! ======
//! A filter is an ordered list of `{column, operator, value}` predicates,
//! combined by logical AND at the query layer. The value's enum variant is
//! its type — text, number, timestamp, level, list, flag — which drives both
//! the URL codec and the server's SQL translation. The user-scope filter is
//! synthesized at query-assembly time and never enters [`FilterState`], so it
//! cannot surface in or be edited through the filter UI.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use serde::{Deserialize, Serialize};

use crate::level::TraceLevel;

/// Comparison operator of a filter predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    Eq,
    Neq,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
    AnyOf,
    AllOf,
}

impl FilterOperator {
    /// Kebab-case form used in URL query parameters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Contains => "contains",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::AnyOf => "any-of",
            Self::AllOf => "all-of",
        }
    }

    /// Parse the kebab-case form. Returns `None` for unknown operators.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "contains" => Some(Self::Contains),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "any-of" => Some(Self::AnyOf),
            "all-of" => Some(Self::AllOf),
            _ => None,
        }
    }

    /// Operators applicable to values of `kind`.
    #[must_use]
    pub fn for_kind(kind: FilterKind) -> &'static [Self] {
        match kind {
            FilterKind::Text => &[Self::Eq, Self::Neq, Self::Contains],
            FilterKind::Number => &[Self::Eq, Self::Gt, Self::Gte, Self::Lt, Self::Lte],
            FilterKind::Timestamp => &[Self::Gte, Self::Lte],
            FilterKind::Level => &[Self::Eq, Self::Gte],
            FilterKind::List => &[Self::AnyOf, Self::AllOf],
            FilterKind::Flag => &[Self::Eq],
        }
    }
}

/// Value type of a filterable column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Text,
    Number,
    Timestamp,
    Level,
    List,
    Flag,
}

/// A typed filter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterValue {
    Text(String),
    Number(f64),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    Level(TraceLevel),
    List(Vec<String>),
    Flag(bool),
}

impl FilterValue {
    /// The value's type (the `type` component of a predicate).
    #[must_use]
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Text(_) => FilterKind::Text,
            Self::Number(_) => FilterKind::Number,
            Self::Timestamp(_) => FilterKind::Timestamp,
            Self::Level(_) => FilterKind::Level,
            Self::List(_) => FilterKind::List,
            Self::Flag(_) => FilterKind::Flag,
        }
    }

    /// Render the value for the URL codec. List entries are comma-joined.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Timestamp(ms) => ms.to_string(),
            Self::Level(level) => level.as_str().to_owned(),
            Self::List(items) => items.join(","),
            Self::Flag(flag) => flag.to_string(),
        }
    }

    /// Parse a raw URL value as `kind`. Returns `None` when the raw text does
    /// not parse — callers drop the predicate rather than erroring.
    #[must_use]
    pub fn parse(kind: FilterKind, raw: &str) -> Option<Self> {
        match kind {
            FilterKind::Text => Some(Self::Text(raw.to_owned())),
            FilterKind::Number => raw.parse::<f64>().ok().map(Self::Number),
            FilterKind::Timestamp => raw.parse::<i64>().ok().map(Self::Timestamp),
            FilterKind::Level => TraceLevel::parse(raw).map(Self::Level),
            FilterKind::List => {
                let items: Vec<String> = raw
                    .split(',')
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect();
                if items.is_empty() { None } else { Some(Self::List(items)) }
            }
            FilterKind::Flag => match raw {
                "true" => Some(Self::Flag(true)),
                "false" => Some(Self::Flag(false)),
                _ => None,
            },
        }
    }
}

/// One `{column, operator, value}` predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub column: String,
    pub op: FilterOperator,
    pub value: FilterValue,
}

impl FilterPredicate {
    /// The synthetic read-only predicate scoping a listing to one end user.
    #[must_use]
    pub fn user_scope(user_id: &str) -> Self {
        Self {
            column: "user_id".to_owned(),
            op: FilterOperator::Eq,
            value: FilterValue::Text(user_id.to_owned()),
        }
    }
}

/// The ordered, user-editable filter list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    predicates: Vec<FilterPredicate>,
}

impl FilterState {
    #[must_use]
    pub fn new(predicates: Vec<FilterPredicate>) -> Self {
        Self { predicates }
    }

    #[must_use]
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn push(&mut self, predicate: FilterPredicate) {
        self.predicates.push(predicate);
    }

    /// Remove the predicate at `index`; out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.predicates.len() {
            self.predicates.remove(index);
        }
    }

    /// The filter actually sent to the query layer: the user's predicates
    /// concatenated with exactly one synthetic user-scope predicate when a
    /// scope id is provided.
    #[must_use]
    pub fn effective(&self, user_scope: Option<&str>) -> Vec<FilterPredicate> {
        let mut effective = self.predicates.clone();
        if let Some(user_id) = user_scope {
            effective.push(FilterPredicate::user_scope(user_id));
        }
        effective
    }
}
