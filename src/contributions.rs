//! Contribution calendar types and the transformations applied to them.
//!
//! GitHub groups a user's contribution calendar into weeks. The service only
//! cares about the flat, chronological list of days and the count recorded
//! for the current local date, so everything here is about turning the
//! week-grouped calendar into a [`ContributionSnapshot`].

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Date format GitHub uses for `ContributionDay.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single calendar day and the number of contributions recorded on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// The day's count.
    pub contribution_count: u32,
    /// ISO calendar date (YYYY-MM-DD). Identifies the day.
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

/// The year-long calendar as returned by GitHub.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Reported by GitHub. Not checked against the sum of the days.
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

/// The published result of a successful fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContributionSnapshot {
    /// Every day of the calendar, oldest first.
    pub days: Vec<ContributionDay>,
    /// Count for the local current date, or 0 if the calendar has no such day.
    pub today_contribution_count: u32,
    /// The date `today_contribution_count` was resolved against.
    pub today: Option<String>,
    pub total_contributions: u32,
}

impl ContributionSnapshot {
    /// Builds a snapshot from a decoded calendar, resolving "today" against `today`.
    pub fn from_calendar(calendar: ContributionCalendar, today: &str) -> Self {
        let total_contributions = calendar.total_contributions;
        let days = flatten_weeks(calendar.weeks);
        let today_contribution_count = today_contribution_count(&days, today);

        Self {
            days,
            today_contribution_count,
            today: Some(today.to_string()),
            total_contributions,
        }
    }
}

/// Concatenates each week's days in source order. No re-sorting by date.
pub fn flatten_weeks(weeks: Vec<ContributionWeek>) -> Vec<ContributionDay> {
    weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .collect()
}

/// Returns the count of the first day whose date equals `today`, or 0.
pub fn today_contribution_count(days: &[ContributionDay], today: &str) -> u32 {
    days.iter()
        .find(|day| day.date == today)
        .map_or(0, |day| day.contribution_count)
}

/// Formats `now` as the calendar date string GitHub uses.
pub fn today_string<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(DATE_FORMAT).to_string()
}

/// The current date in the local timezone.
pub fn local_today() -> String {
    today_string(&Local::now())
}

/// Intensity bucket for a day's contribution count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionLevel {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl ContributionLevel {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Self::None,
            1..=4 => Self::Low,
            5..=9 => Self::Medium,
            10..=19 => Self::High,
            _ => Self::Max,
        }
    }
}

/// Number of contributions that fills the daily progress bar.
pub const DAILY_GOAL: u32 = 10;
const PROGRESS_SEGMENTS: u32 = 5;

/// Daily progress toward [`DAILY_GOAL`], one segment per two contributions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TodayProgress {
    pub goal: u32,
    pub filled_segments: u32,
    pub total_segments: u32,
}

impl TodayProgress {
    pub fn from_count(count: u32) -> Self {
        Self {
            goal: DAILY_GOAL,
            filled_segments: (count / (DAILY_GOAL / PROGRESS_SEGMENTS)).min(PROGRESS_SEGMENTS),
            total_segments: PROGRESS_SEGMENTS,
        }
    }
}
