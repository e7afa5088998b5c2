//! Presentation helpers shared by the dashboard and report handlers.

use chrono::{NaiveDate, NaiveDateTime};

/// Round to a fixed number of decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Round to the nearest integer.
#[must_use]
pub fn round_int(value: f64) -> i64 {
    value.round() as i64
}

/// Render a number with at most `places` decimals and no trailing zeros.
#[must_use]
pub fn number(value: f64, places: usize) -> String {
    let text = format!("{value:.places$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" { "0".to_string() } else { text }
}

/// `92.5` → `"92.5%"`
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{}%", number(value, 1))
}

/// `4.2` → `"+4.2%"`. Negative values keep their sign.
#[must_use]
pub fn signed_percent(value: f64) -> String {
    if value < 0.0 {
        percent(value)
    } else {
        format!("+{}", percent(value))
    }
}

/// Litres with an `L` suffix; non-positive volumes read `0L`.
#[must_use]
pub fn liters(value: f64) -> String {
    if value > 0.0 {
        format!("{}L", number(value, 1))
    } else {
        "0L".to_string()
    }
}

#[must_use]
pub fn hectares(value: f64) -> String {
    format!("{} hectares", number(value, 2))
}

/// Wall-clock time as `HH:MM`.
#[must_use]
pub fn clock(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Wall-clock time as `HH:MM:SS`.
#[must_use]
pub fn clock_seconds(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Hour of day, zero padded: `6` → `"06"`.
#[must_use]
pub fn hour_label(hour: i64) -> String {
    format!("{hour:02}")
}

/// Month bucket label such as `Jan/25`.
#[must_use]
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b/%y").to_string()
}

/// Relative age of a date: `há 3 dias`.
#[must_use]
pub fn days_ago(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    format!("há {days} dias")
}

/// Split a comma-separated list, trimming blanks and dropping empty items.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(6.549, 1), 6.5);
        assert_eq!(round_to(6.551, 2), 6.55);
        assert_eq!(round_to(87.25, 0), 87.0);
        assert_eq!(round_int(59.5), 60);
        assert_eq!(round_int(-0.4), 0);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_int(62.5), 63);
        assert_eq!(round_int(61.5), 62);
        assert_eq!(round_int(-2.5), -3);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(number(92.0, 1), "92");
        assert_eq!(number(92.5, 1), "92.5");
        assert_eq!(number(92.54, 1), "92.5");
        assert_eq!(number(12.0, 2), "12");
        assert_eq!(number(-0.01, 1), "0");
    }

    #[test]
    fn unit_suffixes() {
        assert_eq!(percent(87.3), "87.3%");
        assert_eq!(signed_percent(15.0), "+15%");
        assert_eq!(signed_percent(-2.5), "-2.5%");
        assert_eq!(liters(150.0), "150L");
        assert_eq!(liters(0.0), "0L");
        assert_eq!(liters(-3.0), "0L");
        assert_eq!(hectares(12.5), "12.5 hectares");
    }

    #[test]
    fn clock_labels() {
        assert_eq!(clock(at(6, 5, 9)), "06:05");
        assert_eq!(clock_seconds(at(6, 5, 9)), "06:05:09");
        assert_eq!(hour_label(6), "06");
        assert_eq!(hour_label(18), "18");
    }

    #[test]
    fn month_and_age_labels() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(month_label(jan), "Jan/25");

        let today = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let learned = NaiveDate::from_ymd_opt(2025, 9, 12).unwrap();
        assert_eq!(days_ago(learned, today), "há 3 dias");
        assert_eq!(days_ago(today, today), "há 0 dias");
    }

    #[test]
    fn comma_lists() {
        assert_eq!(split_list("Milho, Soja,,Café "), vec!["Milho", "Soja", "Café"]);
        assert!(split_list("").is_empty());
    }
}
