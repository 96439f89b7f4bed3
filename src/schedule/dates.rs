// Canonical YYYY-MM-DD parsing and calendar-day arithmetic.
use chrono::{Days, Local, NaiveDate};

/// The local calendar date, used as `today` by every production caller.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a canonical `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for anything not shaped `\d{4}-\d{2}-\d{2}` and for a zero
/// year, month, or day. Out-of-range months and days are NOT rejected: they
/// roll forward arithmetically (`2024-02-31` → `2024-03-02`, `2024-13-01` →
/// `2025-01-01`). Stored records were written with that lenient calendar
/// arithmetic, so loading must reproduce it.
pub fn parse_ymd(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return None;
    }

    let year: i32 = input[..4].parse().ok()?;
    let month: u32 = input[5..7].parse().ok()?;
    let day: u64 = input[8..10].parse().ok()?;
    if year == 0 || month == 0 || day == 0 {
        return None;
    }

    let year = year + ((month - 1) / 12) as i32;
    let month = (month - 1) % 12 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(day - 1))
}

/// Formats a date back into the zero-padded canonical form.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whole calendar days from `a` to `b`, positive when `b` is later.
///
/// `NaiveDate` is already a local-midnight truncation, so this is exact date
/// subtraction with no time-of-day component to round away.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}
