//! Russian-locale date formatting for display.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::domain::parse_timestamp;

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

fn month_name(month: u32) -> &'static str {
    MONTHS_GENITIVE
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Long date, e.g. `19 октября 2026 г.`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use frontend::views::format::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
/// assert_eq!(format_date(date), "8 марта 2026 г.");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {} г.", date.day(), month_name(date.month()), date.year())
}

/// Long date with time, e.g. `19 октября 2026 г., 09:05`.
pub fn format_datetime(value: NaiveDateTime) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_date(value.date()),
        value.hour(),
        value.minute()
    )
}

/// Format a raw backend timestamp, echoing it back when unparseable.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), format_datetime)
}

/// Format an optional date, `—` when missing.
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "—".to_owned(), format_date)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2026, 1, 1, "1 января 2026 г.")]
    #[case(2026, 10, 19, "19 октября 2026 г.")]
    #[case(2025, 12, 31, "31 декабря 2025 г.")]
    fn formats_long_dates(#[case] y: i32, #[case] m: u32, #[case] d: u32, #[case] expected: &str) {
        let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
        assert_eq!(format_date(date), expected);
    }

    #[rstest]
    #[case("2026-10-19T09:05:00", "19 октября 2026 г., 09:05")]
    #[case("2026-10-19T21:40:12.5+03:00", "19 октября 2026 г., 21:40")]
    #[case("вчера", "вчера")]
    fn formats_timestamps(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_timestamp(raw), expected);
    }

    #[rstest]
    fn missing_date_renders_dash() {
        assert_eq!(format_optional_date(None), "—");
    }
}
