//! Print time - `H:MM` text entered by the user.

use serde::{Deserialize, Serialize};

/// Hours and minutes parsed from a print time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrintDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl PrintDuration {
    /// Total duration in minutes, saturating at the `i64` bounds.
    pub fn total_minutes(&self) -> i64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    /// Total duration in (fractional) hours.
    pub fn total_hours(&self) -> f64 {
        self.total_minutes() as f64 / 60.0
    }
}

/// Parse the leading integer of `s`, ignoring leading whitespace and any trailing text.
///
/// Returns `None` when no digit follows the optional sign.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));
    Some(if negative { -value } else { value })
}

/// Parse a print time for cost calculation.
///
/// Anything other than exactly two `:`-separated tokens yields zero, and a
/// non-numeric token counts as zero.
pub fn parse_print_time(text: &str) -> PrintDuration {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return PrintDuration::default();
    }

    PrintDuration {
        hours: parse_leading_int(parts[0]).unwrap_or(0),
        minutes: parse_leading_int(parts[1]).unwrap_or(0),
    }
}

/// Normalize user text to `H:MM` once editing of the field is finished.
///
/// Minutes are clamped to 0-59 and hours to zero or more. Text without a
/// colon is read as whole hours.
pub fn format_print_time(text: &str) -> String {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() == 2 {
        let hours = parse_leading_int(parts[0]).unwrap_or(0).max(0);
        let minutes = parse_leading_int(parts[1]).unwrap_or(0).clamp(0, 59);
        return format!("{}:{:02}", hours, minutes);
    }

    let hours = parse_leading_int(text).unwrap_or(0).max(0);
    format!("{}:00", hours)
}

/// Whether `text` is already a well-formed `H:MM` value.
pub fn is_well_formed(text: &str) -> bool {
    let Some((h, m)) = text.split_once(':') else {
        return false;
    };
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !numeric(h) || !numeric(m) || m.len() != 2 {
        return false;
    }
    m.parse::<u32>().map(|m| m < 60).unwrap_or(false)
}
