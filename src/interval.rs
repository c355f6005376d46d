//! Interval strings such as `"1 hour"` or `"30 minutes"`.

use chrono::TimeDelta;

use crate::error::{DiscoverError, Result};

/// Interval used when the configuration does not name one.
pub const DEFAULT_INTERVAL: &str = "1 hour";

/// Parse `"<amount> <unit>"` into a duration.
///
/// `amount` is a non-negative integer or decimal. `unit` is one of
/// second, minute, hour, day or week, singular or plural, any case.
///
/// # Errors
///
/// Returns [`DiscoverError::Config`] for anything else.
pub fn parse_interval(text: &str) -> Result<TimeDelta> {
    let malformed = || DiscoverError::Config(format!("malformed interval `{text}`"));

    let mut parts = text.split_whitespace();
    let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let amount: f64 = amount.parse().map_err(|_| malformed())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(malformed());
    }

    let unit_secs: f64 = match unit.to_ascii_lowercase().trim_end_matches('s') {
        "second" => 1.0,
        "minute" => 60.0,
        "hour" => 3_600.0,
        "day" => 86_400.0,
        "week" => 604_800.0,
        _ => return Err(malformed()),
    };

    let millis = (amount * unit_secs * 1_000.0).round();
    if millis > i64::MAX as f64 {
        return Err(malformed());
    }
    TimeDelta::try_milliseconds(millis as i64).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_is_one_hour() {
        assert_eq!(parse_interval(DEFAULT_INTERVAL).unwrap(), TimeDelta::hours(1));
    }

    #[test]
    fn parses_units_and_plurals() {
        assert_eq!(parse_interval("30 seconds").unwrap(), TimeDelta::seconds(30));
        assert_eq!(parse_interval("1 minute").unwrap(), TimeDelta::minutes(1));
        assert_eq!(parse_interval("12 hours").unwrap(), TimeDelta::hours(12));
        assert_eq!(parse_interval("2 Days").unwrap(), TimeDelta::days(2));
        assert_eq!(parse_interval("1 WEEK").unwrap(), TimeDelta::weeks(1));
    }

    #[test]
    fn parses_decimal_amount() {
        assert_eq!(parse_interval("1.5 hours").unwrap(), TimeDelta::minutes(90));
    }

    #[test]
    fn zero_is_allowed() {
        assert_eq!(parse_interval("0 minutes").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn rejects_malformed() {
        let malformed = [
            "",
            "hour",
            "1",
            "one hour",
            "1 fortnight",
            "-1 hour",
            "1 hour ago",
            "NaN hours",
        ];
        for bad in malformed {
            let err = parse_interval(bad).unwrap_err();
            assert!(
                err.to_string().contains("malformed interval"),
                "{bad:?} gave {err}"
            );
        }
    }
}
