//! Goal distribution engine: spreads a word-count target over the days of a month.
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LayoutError;
use crate::math::{ceil_div, cumulate};

/// Pacing curve used to spread the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Same amount every day.
    Regular,
    /// Effort grows toward the deadline.
    Uphill,
    /// Front-loaded effort ending on a single word (a.k.a. downhill).
    Reverse,
}

/// Whether a label is the day's increment or the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    Cumulative,
    Daily,
}

/// Rounding applied when the target does not divide evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    #[default]
    Up,
    Down,
}

impl Rounding {
    #[must_use]
    pub const fn divide(self, dividend: u64, divisor: u64) -> u64 {
        match self {
            Self::Up => ceil_div(dividend, divisor),
            Self::Down => dividend / divisor,
        }
    }
}

/// Every supported strategy and mode pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalKind {
    #[default]
    RegularCumulative,
    RegularDaily,
    UphillCumulative,
    UphillDaily,
    #[serde(alias = "downhill-cumulative")]
    ReverseCumulative,
    #[serde(alias = "downhill-daily")]
    ReverseDaily,
}

impl GoalKind {
    pub const ALL: [Self; 6] = [
        Self::RegularCumulative,
        Self::RegularDaily,
        Self::UphillCumulative,
        Self::UphillDaily,
        Self::ReverseCumulative,
        Self::ReverseDaily,
    ];

    #[must_use]
    pub const fn new(strategy: Strategy, mode: GoalMode) -> Self {
        match (strategy, mode) {
            (Strategy::Regular, GoalMode::Cumulative) => Self::RegularCumulative,
            (Strategy::Regular, GoalMode::Daily) => Self::RegularDaily,
            (Strategy::Uphill, GoalMode::Cumulative) => Self::UphillCumulative,
            (Strategy::Uphill, GoalMode::Daily) => Self::UphillDaily,
            (Strategy::Reverse, GoalMode::Cumulative) => Self::ReverseCumulative,
            (Strategy::Reverse, GoalMode::Daily) => Self::ReverseDaily,
        }
    }

    #[must_use]
    pub const fn strategy(self) -> Strategy {
        match self {
            Self::RegularCumulative | Self::RegularDaily => Strategy::Regular,
            Self::UphillCumulative | Self::UphillDaily => Strategy::Uphill,
            Self::ReverseCumulative | Self::ReverseDaily => Strategy::Reverse,
        }
    }

    #[must_use]
    pub const fn mode(self) -> GoalMode {
        match self {
            Self::RegularCumulative | Self::UphillCumulative | Self::ReverseCumulative => {
                GoalMode::Cumulative
            }
            Self::RegularDaily | Self::UphillDaily | Self::ReverseDaily => GoalMode::Daily,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegularCumulative => "regular-cumulative",
            Self::RegularDaily => "regular-daily",
            Self::UphillCumulative => "uphill-cumulative",
            Self::UphillDaily => "uphill-daily",
            Self::ReverseCumulative => "reverse-cumulative",
            Self::ReverseDaily => "reverse-daily",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Errors raised when parsing goal names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GoalParseError {
    #[error("unsupported goal kind '{0}'")]
    UnsupportedGoalKind(String),
    #[error("unknown goal rounding '{0}' (expected 'up' or 'down')")]
    UnknownRounding(String),
}

impl FromStr for GoalKind {
    type Err = GoalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular-cumulative" => Ok(Self::RegularCumulative),
            "regular-daily" => Ok(Self::RegularDaily),
            "uphill-cumulative" => Ok(Self::UphillCumulative),
            "uphill-daily" => Ok(Self::UphillDaily),
            "reverse-cumulative" | "downhill-cumulative" => Ok(Self::ReverseCumulative),
            "reverse-daily" | "downhill-daily" => Ok(Self::ReverseDaily),
            other => Err(GoalParseError::UnsupportedGoalKind(other.to_string())),
        }
    }
}

impl FromStr for Rounding {
    type Err = GoalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(GoalParseError::UnknownRounding(other.to_string())),
        }
    }
}

/// Goal inputs for a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub target: u64,
    pub day_count: u32,
    pub kind: GoalKind,
    pub rounding: Rounding,
}

/// One label per day; index `i` belongs to date `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyLabels(Vec<u64>);

impl DailyLabels {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Label for a 1-based day of month.
    #[must_use]
    pub fn for_date(&self, date: u32) -> Option<u64> {
        let index = usize::try_from(date.checked_sub(1)?).ok()?;
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for DailyLabels {
    fn from(labels: Vec<u64>) -> Self {
        Self(labels)
    }
}

/// Compute one label per day for `goal`.
///
/// # Errors
///
/// Returns an error if the day count is zero.
pub fn compute_labels(goal: &GoalSpec) -> Result<DailyLabels, LayoutError> {
    let day_count = NonZeroU32::new(goal.day_count).ok_or(LayoutError::InvalidDayCount {
        day_count: goal.day_count,
    })?;
    Ok(daily_labels(day_count, goal.kind, goal.rounding, goal.target))
}

/// Compute one label per day for a month of `day_count` days.
#[must_use]
pub fn daily_labels(
    day_count: NonZeroU32,
    kind: GoalKind,
    rounding: Rounding,
    target: u64,
) -> DailyLabels {
    let days = u64::from(day_count.get());
    let daily = match kind.strategy() {
        Strategy::Regular => regular_daily(days, rounding, target),
        Strategy::Uphill => uphill_daily(days, rounding, target),
        Strategy::Reverse => reverse_daily(days, rounding, target),
    };
    let labels = match kind.mode() {
        GoalMode::Daily => daily,
        GoalMode::Cumulative => cumulate(daily),
    };
    log::debug!(
        "{kind} over {days} days (rounding {rounding}): last label {:?}",
        labels.last()
    );
    DailyLabels(labels)
}

fn regular_daily(days: u64, rounding: Rounding, target: u64) -> Vec<u64> {
    vec![rounding.divide(target, days); day_slots(days)]
}

fn uphill_daily(days: u64, rounding: Rounding, target: u64) -> Vec<u64> {
    let mut labels = reverse_daily(days, rounding, target);
    labels.reverse();
    labels
}

/// Linearly decreasing from twice the average, with the final day pinned to 1.
fn reverse_daily(days: u64, rounding: Rounding, target: u64) -> Vec<u64> {
    let peak = rounding.divide(target, days).saturating_mul(2);
    let span = days - 1;
    let mut labels = vec![1; day_slots(days)];
    for (i, label) in (0_u64..).zip(labels.iter_mut().take(day_slots(span))) {
        let scaled = i.saturating_mul(peak);
        let adjustment = match rounding {
            Rounding::Up => scaled / span,
            Rounding::Down => ceil_div(scaled, span),
        };
        *label = peak.saturating_sub(adjustment);
    }
    labels
}

fn day_slots(days: u64) -> usize {
    usize::try_from(days).unwrap_or(usize::MAX)
}
