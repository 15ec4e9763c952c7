//! Next-due-date derivation for recurring charges.
//!
//! All calendar arithmetic happens in a pseudo-timezone: a fixed 8-hour
//! offset west of UTC that never shifts for daylight saving. Downstream
//! reminder dispatch fires at a fixed wall-clock hour, so the math here must
//! stay insulated from real timezone-database DST rules. The conversion is
//! a plain shift: pseudo-local = UTC − 8h, and back.
//!
//! The current instant is always an explicit parameter, never read from the
//! system clock, so every derivation is reproducible.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::date::Date;
use crate::error::Error;

/// Hours west of UTC of the fixed business calendar.
pub const BUSINESS_OFFSET_HOURS: i64 = 8;

/// Pseudo-local wall-clock hour at which a charge comes due.
pub const DEFAULT_TARGET_HOUR: u32 = 14;

/// Unit of a custom recurrence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl IntervalUnit {
    pub fn wire_tag(self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Months => "months",
            IntervalUnit::Years => "years",
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "days" => Ok(IntervalUnit::Days),
            "weeks" => Ok(IntervalUnit::Weeks),
            "months" => Ok(IntervalUnit::Months),
            "years" => Ok(IntervalUnit::Years),
            other => Err(Error::InvalidRecurrence(format!(
                "unrecognized interval unit '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_tag())
    }
}

/// How often a charge repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    OneTime,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
    Custom { count: u32, unit: IntervalUnit },
}

impl RecurrenceRule {
    pub fn is_recurring(self) -> bool {
        self != RecurrenceRule::OneTime
    }

    /// Tag understood by the backend, `None` for a one-time charge
    pub fn wire_tag(self) -> Option<&'static str> {
        match self {
            RecurrenceRule::OneTime => None,
            RecurrenceRule::Daily => Some("daily"),
            RecurrenceRule::Weekly => Some("weekly"),
            RecurrenceRule::Biweekly => Some("biweekly"),
            RecurrenceRule::Monthly => Some("monthly"),
            RecurrenceRule::Yearly => Some("yearly"),
            RecurrenceRule::Custom { .. } => Some("custom"),
        }
    }

    fn validate(self) -> Result<(), Error> {
        if let RecurrenceRule::Custom { count, unit } = self {
            if count == 0 {
                return Err(Error::InvalidRecurrence(
                    "custom interval count must be at least 1".to_string(),
                ));
            }
            // a step longer than the whole supported 1000..=9999 calendar
            // can never recur within it, and would overflow the date
            // arithmetic long before that
            let max = match unit {
                IntervalUnit::Days => 3_300_000,
                IntervalUnit::Weeks => 480_000,
                IntervalUnit::Months => 108_000,
                IntervalUnit::Years => 9_000,
            };
            if count > max {
                return Err(Error::InvalidRecurrence(format!(
                    "custom interval of {} {} steps past the supported calendar",
                    count,
                    unit.wire_tag()
                )));
            }
        }
        Ok(())
    }

    /// One recurrence step forward. Always strictly later than `from`
    /// once the rule passed validation.
    fn advance(self, from: Date) -> Date {
        use RecurrenceRule::*;
        match self {
            // one-time charges never reach the stepping loop
            OneTime => from,
            Daily => from.jump_day(1),
            Weekly => from.jump_day(7),
            Biweekly => from.jump_day(14),
            Monthly => from.jump_month(1),
            Yearly => from.jump_year(1),
            Custom { count, unit } => {
                let count = count as isize;
                match unit {
                    IntervalUnit::Days => from.jump_day(count),
                    IntervalUnit::Weeks => from.jump_day(7 * count),
                    IntervalUnit::Months => from.jump_month(count),
                    IntervalUnit::Years => from.jump_year(count),
                }
            }
        }
    }
}

/// When the first cycle of a charge starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartTiming {
    /// Anchor at today's pseudo-local date.
    Now,
    /// Anchor at an explicit pseudo-local calendar date.
    OnDate(Date),
}

impl StartTiming {
    /// Parse the wizard's start field: the literal `"now"` or `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s == "now" {
            Ok(StartTiming::Now)
        } else {
            Ok(StartTiming::OnDate(s.parse::<Date>()?))
        }
    }

    /// Value the backend expects: `"now"` or the date itself
    pub fn wire_value(self) -> String {
        match self {
            StartTiming::Now => "now".to_string(),
            StartTiming::OnDate(d) => d.to_string(),
        }
    }
}

/// Derive the next due instant of a rule, with the default 14:00 target hour.
///
/// Returns `Ok(None)` for a one-time charge.
pub fn next_due_date(
    rule: RecurrenceRule,
    start: StartTiming,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, Error> {
    next_due_date_at(rule, start, now, DEFAULT_TARGET_HOUR)
}

/// Derive the next due instant of a rule.
///
/// The anchor is today's pseudo-local date (`Now`) or the explicit start
/// date. An anchor in the future is the due date itself; otherwise the rule
/// steps forward from the anchor until it reaches today. The result is that
/// date at `target_hour` pseudo-local, shifted back to true UTC.
///
/// Note that the catch-up comparison is against today's pseudo-local
/// *midnight*, not against `now`: a call late in the pseudo-local day can
/// return an instant earlier than `now`, on purpose.
pub fn next_due_date_at(
    rule: RecurrenceRule,
    start: StartTiming,
    now: DateTime<Utc>,
    target_hour: u32,
) -> Result<Option<DateTime<Utc>>, Error> {
    rule.validate()?;
    if !rule.is_recurring() {
        return Ok(None);
    }
    if target_hour >= 24 {
        return Err(Error::InvalidInput(format!(
            "target hour {} is not a wall-clock hour",
            target_hour
        )));
    }
    let today = pseudo_local_date(now)?;
    let anchor = match start {
        StartTiming::Now => today,
        StartTiming::OnDate(d) => d,
    };
    let mut due = anchor;
    while due < today {
        due = rule.advance(due);
    }
    // the last step can overshoot the calendar (year > 9999) when the
    // interval is huge; an explicit anchor is always a parsed in-range date
    if due.year() > 9999 {
        return Err(Error::InvalidRecurrence(
            "next occurrence falls outside the supported calendar".to_string(),
        ));
    }
    Ok(Some(pseudo_local_to_utc(due, target_hour)))
}

/// Calendar date of `now` in the fixed UTC-8 business calendar.
fn pseudo_local_date(now: DateTime<Utc>) -> Result<Date, Error> {
    let shifted = now - Duration::hours(BUSINESS_OFFSET_HOURS);
    let month = crate::date::Month::from_number(shifted.month() as usize).unwrap();
    Ok(Date::from(shifted.year() as usize, month, shifted.day() as usize)?)
}

/// A pseudo-local date at a wall-clock hour, as a true UTC instant.
fn pseudo_local_to_utc(date: Date, hour: u32) -> DateTime<Utc> {
    let wall = Utc
        .with_ymd_and_hms(
            date.year() as i32,
            date.month().number() as u32,
            date.day() as u32,
            hour,
            0,
            0,
        )
        // Utc never has ambiguous or skipped local times
        .single()
        .unwrap();
    wall + Duration::hours(BUSINESS_OFFSET_HOURS)
}
