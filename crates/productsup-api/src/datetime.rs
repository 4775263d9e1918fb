// Flexible datetime parsing
//
// Platform timestamps arrive in two shapes ("2023-05-01 10:00:00" and
// "2023-05-01") and are occasionally absent or non-string. The fallback
// chain is: full datetime, then bare date (midnight), then the Unix epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn epoch() -> NaiveDateTime {
    DateTime::UNIX_EPOCH.naive_utc()
}

/// Parse a platform timestamp, falling back through the three tiers.
/// Never fails: anything unparseable collapses to the epoch.
pub(crate) fn flexible_datetime(raw: Option<&str>) -> NaiveDateTime {
    let Some(raw) = raw else {
        return epoch();
    };
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
        })
        .unwrap_or_else(|_| epoch())
}

/// Serde adapter: deserialize a timestamp field with the flexible policy.
/// Non-string JSON values (null, numbers) also collapse to the epoch.
pub(crate) fn de_flexible<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flexible_datetime(value.as_str()))
}

/// Serde adapter for optional timestamp fields: a present string is parsed
/// with the flexible policy, null stays `None`.
pub(crate) fn de_flexible_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(|s| flexible_datetime(Some(s))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_full_datetime() {
        let dt = flexible_datetime(Some("2023-05-01 10:00:00"));
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 5, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 0, 0));
    }

    #[test]
    fn falls_back_to_bare_date_at_midnight() {
        let dt = flexible_datetime(Some("2023-05-01"));
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 5, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn absent_input_is_the_epoch() {
        let dt = flexible_datetime(None);
        assert_eq!((dt.year(), dt.month(), dt.day()), (1970, 1, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn unparseable_input_is_the_epoch() {
        let dt = flexible_datetime(Some("yesterday-ish"));
        assert_eq!(dt, epoch());
    }

    #[test]
    fn non_string_json_values_collapse_to_the_epoch() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "de_flexible")]
            at: NaiveDateTime,
        }
        let row: Row = serde_json::from_value(serde_json::json!({ "at": 1234 })).unwrap();
        assert_eq!(row.at, epoch());
    }
}
