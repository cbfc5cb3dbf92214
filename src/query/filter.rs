//! Typed filter descriptors and the AND-combined filter set.

use crate::error::{Result, RollcallError};
use crate::store::Record;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Highest score a range filter may name.
const MAX_SCORE_BOUND: u8 = 100;

/// A single predicate over one record field.
///
/// A range whose lower bound exceeds its upper bound is accepted as a value but matches
/// nothing; [`Filter::parse`] rejects such input instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Inclusive score range
    ScoreRange { min: u8, max: u8 },
    /// Exact match on the attribution label
    AddedBy(String),
    /// Inclusive range on last activity
    ActiveBetween {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl Filter {
    pub fn score_range(min: u8, max: u8) -> Self {
        Self::ScoreRange { min, max }
    }

    pub fn added_by(name: impl Into<String>) -> Self {
        Self::AddedBy(name.into())
    }

    /// Last activity within `days` days before `anchor`.
    pub fn active_within_days(days: u32, anchor: DateTime<Utc>) -> Self {
        Self::ActiveBetween {
            from: anchor - Duration::days(i64::from(days)),
            to: anchor,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::ScoreRange { min, max } => *min <= record.score && record.score <= *max,
            Filter::AddedBy(name) => record.added_by == name.as_str(),
            Filter::ActiveBetween { from, to } => {
                *from <= record.last_activity && record.last_activity <= *to
            }
        }
    }

    /// Human-readable label for filter pills.
    pub fn label(&self) -> String {
        match self {
            Filter::ScoreRange { min, max } => format!("Score {min}-{max}"),
            Filter::AddedBy(name) => format!("Added by {name}"),
            Filter::ActiveBetween { from, to } => format!(
                "Active {}..{}",
                from.format("%Y-%m-%d"),
                to.format("%Y-%m-%d")
            ),
        }
    }

    /// Parse `score:MIN-MAX`, `added:NAME` or `active:Nd`.
    ///
    /// The keyword may also be separated by whitespace (`score 26-50`). Relative date
    /// filters are resolved against `anchor`.
    pub fn parse(input: &str, anchor: DateTime<Utc>) -> Result<Self> {
        let trimmed = input.trim();
        let (kind, value) = trimmed
            .split_once(|c: char| c == ':' || c.is_whitespace())
            .ok_or_else(|| RollcallError::invalid_filter(input, "expected KIND:VALUE"))?;
        let value = value.trim();

        match kind.to_ascii_lowercase().as_str() {
            "score" => parse_score_range(input, value),
            "added" | "added_by" | "addedby" => {
                if value.is_empty() {
                    Err(RollcallError::invalid_filter(input, "missing name"))
                } else {
                    Ok(Filter::added_by(value))
                }
            }
            "active" => {
                let days = value
                    .strip_suffix('d')
                    .unwrap_or(value)
                    .parse::<u32>()
                    .map_err(|_| RollcallError::invalid_filter(input, "expected a day count"))?;
                Ok(Filter::active_within_days(days, anchor))
            }
            other => Err(RollcallError::invalid_filter(
                input,
                format!("unknown filter kind '{other}'"),
            )),
        }
    }
}

fn parse_score_range(input: &str, value: &str) -> Result<Filter> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| RollcallError::invalid_filter(input, "expected MIN-MAX"))?;
    let bound = |text: &str| {
        text.trim()
            .parse::<u8>()
            .ok()
            .filter(|score| *score <= MAX_SCORE_BOUND)
            .ok_or_else(|| RollcallError::invalid_filter(input, "scores range from 0 to 100"))
    };
    let (min, max) = (bound(min)?, bound(max)?);
    if min > max {
        return Err(RollcallError::invalid_filter(input, "min exceeds max"));
    }
    Ok(Filter::score_range(min, max))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Ordered, duplicate-free list of active filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. Returns false (and changes nothing) if it is already active.
    pub fn add(&mut self, filter: Filter) -> bool {
        if self.filters.contains(&filter) {
            return false;
        }
        self.filters.push(filter);
        true
    }

    pub fn remove(&mut self, filter: &Filter) -> bool {
        let before = self.filters.len();
        self.filters.retain(|active| active != filter);
        self.filters.len() != before
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Filter> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    /// Drop every filter. Returns true if any were active.
    pub fn clear(&mut self) -> bool {
        let had_filters = !self.filters.is_empty();
        self.filters.clear();
        had_filters
    }

    /// True when the record passes every filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.filters.iter().map(Filter::label).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.add(filter);
        }
        set
    }
}
