//! Duration grammar for time-delta parameters.
//!
//! Two forms are accepted, tried in this order:
//!
//! - ISO-8601 durations: `PnW`, or `PnDTnHnMnS` with every field optional
//!   (years and months are not supported).
//! - Shorthand: `n {w[eek[s]]|d[ay[s]]|h[our[s]]|m[inute[s]]|s[econd[s]]}`
//!   groups such as `1 week 2 days`, `1h30m` or `3 m`. Groups must be written
//!   from the longest unit to the shortest.
//!
//! A form only wins if at least one of its fields is non-zero, so `P0D` is
//! rejected rather than read as an empty duration. Both patterns are anchored
//! at the start of the text only.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::{Captures, Regex};

use crate::error::{Error, Result};

type UnitConstructor = fn(i64) -> Option<TimeDelta>;

/// Field names, longest unit first, and how to turn a count into a duration.
const UNITS: [(&str, UnitConstructor); 5] = [
    ("weeks", TimeDelta::try_weeks),
    ("days", TimeDelta::try_days),
    ("hours", TimeDelta::try_hours),
    ("minutes", TimeDelta::try_minutes),
    ("seconds", TimeDelta::try_seconds),
];

// ISO 8601 does not allow weeks together with other fields; neither does this
static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    let field = |name: &str| format!("(?:(?P<{name}>[0-9]+){})", name[..1].to_uppercase());
    let pattern = format!(
        "^P(?:(?P<weeks>[0-9]+)W|{}?(?:T{}?{}?{}?)?)",
        field("days"),
        field("hours"),
        field("minutes"),
        field("seconds"),
    );
    Regex::new(&pattern).unwrap()
});

// Digits, then the unit's first letter, optionally the rest of the word
// without its last letter, optionally that last letter
static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    let pattern: String = UNITS
        .iter()
        .map(|(name, _)| {
            let last = name.len() - 1;
            format!(
                "(?:(?P<{name}>[0-9]+) ?{}(?:{})?(?:{})? ?)?",
                &name[..1],
                &name[1..last],
                &name[last..]
            )
        })
        .collect();
    Regex::new(&format!("^{pattern}")).unwrap()
});

/// Parses a duration in either the ISO-8601 or the shorthand form.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] if neither form yields a non-zero
/// duration.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use rust_params_core::duration::parse_duration;
///
/// assert_eq!(parse_duration("P1W")?, TimeDelta::days(7));
/// assert_eq!(parse_duration("1 h 30 m")?, TimeDelta::minutes(90));
/// assert!(parse_duration("P0D").is_err());
/// # Ok::<(), rust_params_core::error::Error>(())
/// ```
pub fn parse_duration(text: &str) -> Result<TimeDelta> {
    parse_iso_8601(text)
        .or_else(|| parse_shorthand(text))
        .ok_or_else(|| Error::InvalidDuration(text.to_string()))
}

/// ISO-8601 form only. `None` when the text does not match or every field is
/// zero.
pub fn parse_iso_8601(text: &str) -> Option<TimeDelta> {
    apply(&ISO_8601, text)
}

/// Shorthand form only. `None` when nothing matches or every field is zero.
pub fn parse_shorthand(text: &str) -> Option<TimeDelta> {
    apply(&SHORTHAND, text)
}

fn apply(regex: &Regex, text: &str) -> Option<TimeDelta> {
    let captures = regex.captures(text)?;

    let mut total = TimeDelta::zero();
    let mut has_value = false;
    for (name, to_duration) in UNITS {
        let count = field_value(&captures, name)?;
        has_value |= count != 0;
        total = total.checked_add(&to_duration(count)?)?;
    }

    has_value.then_some(total)
}

/// Value of a named field, zero when absent; `None` on overflow.
fn field_value(captures: &Captures<'_>, name: &str) -> Option<i64> {
    match captures.name(name) {
        Some(digits) => digits.as_str().parse().ok(),
        None => Some(0),
    }
}
