//! Opening-hours grammar for location records.
//!
//! Admins enter weekly opening hours as plain text, one line per day:
//!
//! ```text
//! 7.30-15.30,19.30-28
//! 11-14
//! ...            (seven lines, Monday through Sunday)
//! ```
//!
//! Each line is a comma-separated list of `START-END` ranges, where each side
//! is `H` or `H.M` (hour, optional minute). A closing time past midnight is
//! written as an hour greater than 24: `19.30-28` means 7:30 PM until 4 AM the
//! next day. Keeping the overnight case on the same day's line means range
//! validity stays a single comparison (`end >= start`) and no day-boundary
//! bookkeeping is needed; renderers interpret hours ≥ 24 as "next day".
//!
//! ## Strictness
//!
//! Tokens are not trimmed; `7 - 15` is a parse error because the integer
//! conversion sees the embedded spaces. Hours are bounded (start 0–24, end
//! 0–48, end not before start). Minutes are carried verbatim and not bounded.
//! Two quirks of the legacy admin tool are kept so existing data parses the
//! same way: a range with extra `-` segments uses only the first two, and
//! week input with more than seven lines ignores the extras.

use serde::{Serialize, Serializer};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoursError {
    #[error("opening hours must be a start-end range: {0:?}")]
    MalformedRange(String),
    #[error("invalid number {token:?} in opening hours")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid opening range {start}-{end}: start must be 0-24, end must be 0-48 and not before start")]
    InvalidRange { start: u32, end: u32 },
    #[error("opening hours must cover all seven days, got {0} line(s)")]
    IncompleteWeek(usize),
    #[error("{day}: {source}")]
    InvalidDay {
        day: &'static str,
        #[source]
        source: Box<HoursError>,
    },
}

/// Day names in week order, matching the line order of week input.
pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A clock time within a schedule day.
///
/// `hour` runs 0–48 so a closing time past midnight stays on the same day
/// (26 = 2 AM the next day). Serializes as a two-element `[hour, minute]`
/// array, the shape Zola templates index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.hour, self.minute].serialize(serializer)
    }
}

/// One contiguous open period within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpeningRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Ranges for one day, in the order they were written. Never sorted or merged.
pub type DaySchedule = Vec<OpeningRange>;

/// Opening hours for all seven days.
///
/// A struct rather than a map so the day set is fixed by construction and
/// front matter always emits the days in week order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySchedule {
    #[serde(rename = "Monday")]
    pub monday: DaySchedule,
    #[serde(rename = "Tuesday")]
    pub tuesday: DaySchedule,
    #[serde(rename = "Wednesday")]
    pub wednesday: DaySchedule,
    #[serde(rename = "Thursday")]
    pub thursday: DaySchedule,
    #[serde(rename = "Friday")]
    pub friday: DaySchedule,
    #[serde(rename = "Saturday")]
    pub saturday: DaySchedule,
    #[serde(rename = "Sunday")]
    pub sunday: DaySchedule,
}

impl WeeklySchedule {
    /// Day name / schedule pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DaySchedule)> {
        [
            (DAYS[0], &self.monday),
            (DAYS[1], &self.tuesday),
            (DAYS[2], &self.wednesday),
            (DAYS[3], &self.thursday),
            (DAYS[4], &self.friday),
            (DAYS[5], &self.saturday),
            (DAYS[6], &self.sunday),
        ]
        .into_iter()
    }
}

/// Parse one `START-END` range like `7.30-15.30` or `11-14`.
pub fn parse_range(text: &str) -> Result<OpeningRange, HoursError> {
    let mut sides = text.split('-');
    let (Some(start), Some(end)) = (sides.next(), sides.next()) else {
        return Err(HoursError::MalformedRange(text.to_string()));
    };
    // Additional `-` segments are ignored, same as the legacy admin tool.

    let start = parse_time(start)?;
    let end = parse_time(end)?;

    if start.hour > 24 || end.hour > 48 || end.hour < start.hour {
        return Err(HoursError::InvalidRange {
            start: start.hour,
            end: end.hour,
        });
    }

    Ok(OpeningRange { start, end })
}

/// Parse one side of a range: `H` or `H.M`. Minute defaults to 0.
fn parse_time(token: &str) -> Result<TimeOfDay, HoursError> {
    let mut parts = token.split('.');
    let hour = parse_number(parts.next().unwrap_or_default())?;
    let minute = match parts.next() {
        Some(m) => parse_number(m)?,
        None => 0,
    };
    Ok(TimeOfDay { hour, minute })
}

fn parse_number(token: &str) -> Result<u32, HoursError> {
    token.parse().map_err(|source| HoursError::InvalidNumber {
        token: token.to_string(),
        source,
    })
}

/// Parse a comma-separated day line like `7.30-15.30,19.30-28`.
///
/// Ranges come back in the order written; the first bad range aborts the
/// whole line.
pub fn parse_day(text: &str) -> Result<DaySchedule, HoursError> {
    text.split(',').map(parse_range).collect()
}

/// Parse a newline-separated week, Monday first.
///
/// Requires at least seven lines; lines past the seventh are ignored. The
/// first failing day aborts the parse and names the day in the error.
pub fn parse_week(text: &str) -> Result<WeeklySchedule, HoursError> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < DAYS.len() {
        return Err(HoursError::IncompleteWeek(lines.len()));
    }

    let day = |i: usize| -> Result<DaySchedule, HoursError> {
        parse_day(lines[i]).map_err(|source| HoursError::InvalidDay {
            day: DAYS[i],
            source: Box::new(source),
        })
    };

    // Struct fields evaluate in order, so the first failing day wins.
    Ok(WeeklySchedule {
        monday: day(0)?,
        tuesday: day(1)?,
        wednesday: day(2)?,
        thursday: day(3)?,
        friday: day(4)?,
        saturday: day(5)?,
        sunday: day(6)?,
    })
}
