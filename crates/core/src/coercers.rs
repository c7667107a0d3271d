//! Scalar coercers.
//!
//! Every parameter type is a [`Coercer`]: a mapping from raw text to a typed
//! [`Value`] and back. [`ParameterKind`] is the closed set of built-in types
//! and hands out the matching coercer.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_interval::parse_interval;
use crate::duration::parse_duration;
use crate::error::{Error, Result};
use crate::value::{Value, DATE_HOUR_FORMAT};

pub trait Coercer: Send + Sync {
    /// Name used in parse failures.
    fn type_name(&self) -> &'static str;

    /// Converts raw text into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the offending text when it does not match
    /// the type's grammar.
    fn parse(&self, raw: &str) -> Result<Value>;

    /// Renders a value back into text that `parse` accepts.
    fn serialize(&self, value: &Value) -> String {
        value.to_string()
    }
}

/// Raw text, unchanged.
pub struct Identity;

pub struct Integer;

pub struct Float;

/// `true`/`false` in any case.
pub struct Boolean;

/// `YYYY-MM-DD`.
pub struct Date;

/// `YYYY-MM-DDTHH`, ISO 8601 with a literal `T`.
pub struct DateHour;

/// See [`crate::date_interval`].
pub struct DateIntervalCoercer;

/// See [`crate::duration`].
pub struct TimeDelta;

impl Coercer for Identity {
    fn type_name(&self) -> &'static str {
        "str"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        Ok(Value::Str(raw.to_string()))
    }
}

impl Coercer for Integer {
    fn type_name(&self) -> &'static str {
        "int"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        raw.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Error::parse_failure(raw, self.type_name()))
    }
}

impl Coercer for Float {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        raw.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::parse_failure(raw, self.type_name()))
    }
}

impl Coercer for Boolean {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else {
            Err(Error::parse_failure(raw, self.type_name()))
        }
    }
}

impl Coercer for Date {
    fn type_name(&self) -> &'static str {
        "date"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        let parts: Vec<&str> = raw.split('-').collect();
        let [year, month, day] = parts[..] else {
            return Err(Error::parse_failure(raw, self.type_name()));
        };

        let date = match (
            year.trim().parse::<i32>(),
            month.trim().parse::<u32>(),
            day.trim().parse::<u32>(),
        ) {
            (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day),
            _ => None,
        };

        date.map(Value::Date)
            .ok_or_else(|| Error::parse_failure(raw, self.type_name()))
    }
}

impl Coercer for DateHour {
    fn type_name(&self) -> &'static str {
        "date_hour"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        let failure = || Error::parse_failure(raw, self.type_name());

        let (date, hour) = raw.split_once('T').ok_or_else(failure)?;
        if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
            return Err(failure());
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| failure())?;
        let hour: u32 = hour.parse().map_err(|_| failure())?;

        date.and_hms_opt(hour, 0, 0)
            .map(Value::DateHour)
            .ok_or_else(failure)
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::DateHour(date_hour) => date_hour.format(DATE_HOUR_FORMAT).to_string(),
            other => other.to_string(),
        }
    }
}

impl Coercer for DateIntervalCoercer {
    fn type_name(&self) -> &'static str {
        "date_interval"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        parse_interval(raw).map(Value::Interval)
    }
}

impl Coercer for TimeDelta {
    fn type_name(&self) -> &'static str {
        "time_delta"
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        parse_duration(raw).map(Value::Duration)
    }
}

/// The built-in parameter types.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    #[default]
    #[serde(alias = "string")]
    Str,
    #[serde(alias = "integer")]
    Int,
    Float,
    #[serde(alias = "boolean")]
    Bool,
    Date,
    DateHour,
    DateInterval,
    TimeDelta,
}

impl ParameterKind {
    pub fn coercer(self) -> &'static dyn Coercer {
        match self {
            ParameterKind::Str => &Identity,
            ParameterKind::Int => &Integer,
            ParameterKind::Float => &Float,
            ParameterKind::Bool => &Boolean,
            ParameterKind::Date => &Date,
            ParameterKind::DateHour => &DateHour,
            ParameterKind::DateInterval => &DateIntervalCoercer,
            ParameterKind::TimeDelta => &TimeDelta,
        }
    }
}

impl Display for ParameterKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.coercer().type_name())
    }
}
