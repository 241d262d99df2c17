//! Date validation for the timeline step.
//!
//! Candidates are checked on every edit. An out-of-range candidate is not
//! kept: the field is repaired to the nearest valid value and an alert is
//! returned for the front end to show.

use jiff::{civil::Date, Span, Zoned};

pub const PAST_START_ALERT: &str = "Please select today or a future date";
pub const END_BEFORE_START_ALERT: &str = "End date must be on or after the start date";

/// Length of the window used when no dates were chosen.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Outcome of a date edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEdit {
    Accepted(Date),
    Repaired { value: Date, alert: &'static str },
}

impl DateEdit {
    /// The value the field holds after the edit.
    pub fn value(&self) -> Date {
        match self {
            DateEdit::Accepted(value) | DateEdit::Repaired { value, .. } => *value,
        }
    }

    pub fn alert(&self) -> Option<&'static str> {
        match self {
            DateEdit::Accepted(_) => None,
            DateEdit::Repaired { alert, .. } => Some(alert),
        }
    }
}

/// A start date must be today or later.
pub fn validate_start(candidate: Date, today: Date) -> DateEdit {
    if candidate < today {
        DateEdit::Repaired {
            value: today,
            alert: PAST_START_ALERT,
        }
    } else {
        DateEdit::Accepted(candidate)
    }
}

/// An end date must not precede the start date, or today when no start date
/// has been picked yet.
pub fn validate_end(candidate: Date, start: Option<Date>, today: Date) -> DateEdit {
    let floor = start.unwrap_or(today);
    if candidate < floor {
        DateEdit::Repaired {
            value: floor,
            alert: END_BEFORE_START_ALERT,
        }
    } else {
        DateEdit::Accepted(candidate)
    }
}

/// The local calendar date.
pub fn today() -> Date {
    Zoned::now().date()
}

/// `today` through `today + 30 days`.
pub fn default_window(today: Date) -> (Date, Date) {
    let end = today
        .checked_add(Span::new().days(DEFAULT_WINDOW_DAYS))
        .unwrap_or(today);
    (today, end)
}
