//! Typed parameter values.
//!
//! A [`Value`] is what a parameter resolves to. Scalars carry the type their
//! coercer produced, list parameters resolve to [`Value::List`].

use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::date_interval::DateInterval;

/// Format used to render and parse date-hour values.
pub const DATE_HOUR_FORMAT: &str = "%Y-%m-%dT%H";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateHour(NaiveDateTime),
    Interval(DateInterval),
    Duration(TimeDelta),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => formatter.write_str(s),
            Value::Int(i) => write!(formatter, "{i}"),
            Value::Float(f) => write!(formatter, "{f}"),
            Value::Bool(true) => formatter.write_str("True"),
            Value::Bool(false) => formatter.write_str("False"),
            Value::Date(date) => write!(formatter, "{}", date.format("%Y-%m-%d")),
            Value::DateHour(date_hour) => {
                write!(formatter, "{}", date_hour.format(DATE_HOUR_FORMAT))
            }
            Value::Interval(interval) => write!(formatter, "{interval}"),
            Value::Duration(duration) => write!(formatter, "{duration}"),
            Value::List(values) => {
                let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(formatter, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Value::Duration(value)
    }
}

impl From<DateInterval> for Value {
    fn from(value: DateInterval) -> Self {
        Value::Interval(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
