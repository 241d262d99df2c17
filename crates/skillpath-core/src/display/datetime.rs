//! Timeline display utilities.

use std::fmt;

use jiff::civil::Date;

/// A wrapper around a plan's start/end dates that formats the pair as one
/// human-readable range.
///
/// # Format
///
/// - both dates: `2025-06-01 to 2025-06-30 (30 days)`
/// - one date: `from 2025-06-01` / `until 2025-06-30`
/// - neither: `not scheduled`
pub struct Timeline(pub Option<Date>, pub Option<Date>);

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(start), Some(end)) => {
                let days = start
                    .until(end)
                    .map(|span| span.get_days() + 1)
                    .unwrap_or_default();
                write!(f, "{start} to {end} ({days} days)")
            }
            (Some(start), None) => write!(f, "from {start}"),
            (None, Some(end)) => write!(f, "until {end}"),
            (None, None) => write!(f, "not scheduled"),
        }
    }
}
