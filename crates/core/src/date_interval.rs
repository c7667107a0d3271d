//! Date intervals and the grammar used to parse them.
//!
//! An interval is a half-open range of days `[date_a, date_b)` tagged with the
//! kind of calendar unit it was written as. Textual forms, in the order the
//! grammar tries them:
//!
//! - `2024`: a year
//! - `2024-03`: a month
//! - `2024-W09`: an ISO week
//! - `2024-03-15`: a single day
//! - `2024-03-01-2024-04-15`: a custom range, end exclusive
//!
//! The order matters: a date is a textual prefix of a custom range, and the
//! first format that accepts the whole string wins.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use regex::Regex;

use crate::error::{Error, Result};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{4})$").unwrap());
static MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})$").unwrap());
static WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-W([0-9]{2})$").unwrap());
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());
static CUSTOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})-([0-9]{4}-[0-9]{2}-[0-9]{2})$").unwrap()
});

/// The calendar unit an interval was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    Year,
    Month,
    Week,
    Date,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    kind: IntervalKind,
    date_a: NaiveDate,
    date_b: NaiveDate,
}

impl DateInterval {
    pub fn year(year: i32) -> Option<Self> {
        let date_a = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let date_b = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
        Some(Self {
            kind: IntervalKind::Year,
            date_a,
            date_b,
        })
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        let date_a = NaiveDate::from_ymd_opt(year, month, 1)?;
        let date_b = date_a.checked_add_months(Months::new(1))?;
        Some(Self {
            kind: IntervalKind::Month,
            date_a,
            date_b,
        })
    }

    /// An ISO-8601 week, starting on Monday.
    pub fn week(year: i32, week: u32) -> Option<Self> {
        let date_a = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        let date_b = date_a.checked_add_days(Days::new(7))?;
        Some(Self {
            kind: IntervalKind::Week,
            date_a,
            date_b,
        })
    }

    pub fn date(date: NaiveDate) -> Option<Self> {
        Some(Self {
            kind: IntervalKind::Date,
            date_a: date,
            date_b: date.succ_opt()?,
        })
    }

    /// A custom range; `end` is exclusive and must come after `start`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end <= start {
            return None;
        }

        Some(Self {
            kind: IntervalKind::Custom,
            date_a: start,
            date_b: end,
        })
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    /// First day of the interval.
    pub fn date_a(&self) -> NaiveDate {
        self.date_a
    }

    /// First day after the interval.
    pub fn date_b(&self) -> NaiveDate {
        self.date_b
    }

    /// Every day in the interval, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.date_a
            .iter_days()
            .take_while(|date| *date < self.date_b)
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.date_a <= date && date < self.date_b
    }

    /// Number of days covered.
    pub fn len(&self) -> i64 {
        (self.date_b - self.date_a).num_days()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The interval of the same kind directly after this one.
    ///
    /// Custom ranges have no natural successor and return `None`.
    pub fn next(&self) -> Option<Self> {
        match self.kind {
            IntervalKind::Year => Self::year(self.date_a.year().checked_add(1)?),
            IntervalKind::Month => Self::month_containing(self.date_b),
            IntervalKind::Week => Self::week_containing(self.date_b),
            IntervalKind::Date => Self::date(self.date_b),
            IntervalKind::Custom => None,
        }
    }

    /// The interval of the same kind directly before this one.
    pub fn prev(&self) -> Option<Self> {
        match self.kind {
            IntervalKind::Year => Self::year(self.date_a.year().checked_sub(1)?),
            IntervalKind::Month => Self::month_containing(self.date_a.pred_opt()?),
            IntervalKind::Week => Self::week_containing(self.date_a.pred_opt()?),
            IntervalKind::Date => Self::date(self.date_a.pred_opt()?),
            IntervalKind::Custom => None,
        }
    }

    fn month_containing(date: NaiveDate) -> Option<Self> {
        Self::month(date.year(), date.month())
    }

    fn week_containing(date: NaiveDate) -> Option<Self> {
        let iso_week = date.iso_week();
        Self::week(iso_week.year(), iso_week.week())
    }
}

impl Display for DateInterval {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            IntervalKind::Year => write!(formatter, "{}", self.date_a.format("%Y")),
            IntervalKind::Month => write!(formatter, "{}", self.date_a.format("%Y-%m")),
            IntervalKind::Week => {
                let iso_week = self.date_a.iso_week();
                write!(formatter, "{:04}-W{:02}", iso_week.year(), iso_week.week())
            }
            IntervalKind::Date => write!(formatter, "{}", self.date_a.format("%Y-%m-%d")),
            IntervalKind::Custom => write!(
                formatter,
                "{}-{}",
                self.date_a.format("%Y-%m-%d"),
                self.date_b.format("%Y-%m-%d")
            ),
        }
    }
}

impl FromStr for DateInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_interval(s)
    }
}

/// A single textual interval format. Returns `None` when the text is not in
/// this format (or names an impossible date).
pub type IntervalFormat = fn(&str) -> Option<DateInterval>;

/// The built-in formats in the order they are tried.
pub const STANDARD_FORMATS: [IntervalFormat; 5] =
    [parse_year, parse_month, parse_week, parse_date, parse_custom];

/// Parses `text` with the built-in formats.
///
/// # Errors
///
/// Returns [`Error::InvalidInterval`] if no format accepts the text.
pub fn parse_interval(text: &str) -> Result<DateInterval> {
    parse_with(text, &STANDARD_FORMATS)
}

/// Tries each format in order and returns the first interval produced.
///
/// # Errors
///
/// Returns [`Error::InvalidInterval`] if every format rejects the text.
pub fn parse_with(text: &str, formats: &[IntervalFormat]) -> Result<DateInterval> {
    formats
        .iter()
        .find_map(|format| format(text))
        .ok_or_else(|| Error::InvalidInterval(text.to_string()))
}

pub fn parse_year(text: &str) -> Option<DateInterval> {
    let captures = YEAR.captures(text)?;
    DateInterval::year(captures[1].parse().ok()?)
}

pub fn parse_month(text: &str) -> Option<DateInterval> {
    let captures = MONTH.captures(text)?;
    DateInterval::month(captures[1].parse().ok()?, captures[2].parse().ok()?)
}

pub fn parse_week(text: &str) -> Option<DateInterval> {
    let captures = WEEK.captures(text)?;
    DateInterval::week(captures[1].parse().ok()?, captures[2].parse().ok()?)
}

pub fn parse_date(text: &str) -> Option<DateInterval> {
    DateInterval::date(date_from_text(text)?)
}

pub fn parse_custom(text: &str) -> Option<DateInterval> {
    let captures = CUSTOM.captures(text)?;
    DateInterval::custom(date_from_text(&captures[1])?, date_from_text(&captures[2])?)
}

fn date_from_text(text: &str) -> Option<NaiveDate> {
    let captures = DATE.captures(text)?;
    NaiveDate::from_ymd_opt(
        captures[1].parse().ok()?,
        captures[2].parse().ok()?,
        captures[3].parse().ok()?,
    )
}
