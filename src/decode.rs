//! Lenient attribute decoders.
//!
//! Kitsu attributes are loosely typed: numbers sometimes arrive as strings
//! (`averageRating: "82.3"`), optional fields may be absent or `null`, and
//! the schema drifts over time. Each decoder here reads the raw JSON value
//! and yields `None` (or an empty collection) instead of an error when the
//! value is missing or has an unexpected shape.
//!
//! Use them with `#[serde(default, deserialize_with = "...")]`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A resource ID, given as a string or a number.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "resource id must be a string or number, got {other}"
        ))),
    }
}

/// A string value. Numbers and booleans are not converted.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A string value, converting numbers to their decimal form.
pub fn string_lossy<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A float given either as a JSON number or as a numeric string.
pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(as_f64(&Value::deserialize(deserializer)?))
}

/// A non-negative integer given as a number or numeric string.
pub fn uint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    Ok(as_u64(&Value::deserialize(deserializer)?).and_then(|n| T::try_from(n).ok()))
}

/// A boolean given as `true`/`false` or as the strings `"true"`/`"false"`.
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// An ISO-8601 timestamp, normalized to UTC.
pub fn datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_datetime(&s),
        _ => None,
    })
}

/// A calendar date in `YYYY-MM-DD` form. Full timestamps keep only the date.
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// A list of strings. Non-string entries are dropped.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A flat object of string (or numeric) values. Other entries are dropped.
pub fn string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Any type that deserializes from the value; `None` if it does not.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Any type that deserializes from the value; its default if it does not.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Timestamps without an offset are UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(default, deserialize_with = "float")]
        average_rating: Option<f64>,
        #[serde(default, deserialize_with = "uint")]
        user_count: Option<u32>,
        #[serde(default, deserialize_with = "datetime")]
        created_at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "date")]
        start_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "boolean")]
        nsfw: Option<bool>,
        #[serde(default, deserialize_with = "string_list")]
        abbreviated_titles: Vec<String>,
        #[serde(default, deserialize_with = "string_map")]
        rating_frequencies: BTreeMap<String, String>,
        #[serde(default, deserialize_with = "string")]
        slug: Option<String>,
    }

    #[test]
    fn test_coerces_strings_to_numbers() {
        let json = r#"{
            "averageRating": "82.3",
            "userCount": "1500",
            "createdAt": "2013-02-20T16:00:13.609Z",
            "startDate": "1998-04-03",
            "nsfw": false,
            "abbreviatedTitles": ["COWBOY BEBOP", null, 3],
            "ratingFrequencies": {"2": "10", "20": 44, "bad": null},
            "slug": "cowboy-bebop"
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.average_rating, Some(82.3));
        assert_eq!(sample.user_count, Some(1500));
        let created = sample.created_at.unwrap();
        assert_eq!((created.year(), created.hour()), (2013, 16));
        assert_eq!(sample.start_date, NaiveDate::from_ymd_opt(1998, 4, 3));
        assert_eq!(sample.nsfw, Some(false));
        assert_eq!(sample.abbreviated_titles, vec!["COWBOY BEBOP"]);
        assert_eq!(sample.rating_frequencies.get("20").map(String::as_str), Some("44"));
        assert!(!sample.rating_frequencies.contains_key("bad"));
        assert_eq!(sample.slug.as_deref(), Some("cowboy-bebop"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert!(sample.average_rating.is_none());
        assert!(sample.user_count.is_none());
        assert!(sample.created_at.is_none());
        assert!(sample.start_date.is_none());
        assert!(sample.nsfw.is_none());
        assert!(sample.abbreviated_titles.is_empty());
        assert!(sample.rating_frequencies.is_empty());
        assert!(sample.slug.is_none());
    }

    #[test]
    fn test_malformed_values_are_none() {
        let json = r#"{
            "averageRating": {"nested": true},
            "userCount": -4,
            "createdAt": "yesterday",
            "startDate": 1998,
            "nsfw": "maybe",
            "abbreviatedTitles": "COWBOY BEBOP",
            "ratingFrequencies": [1, 2],
            "slug": 12
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert!(sample.average_rating.is_none());
        assert!(sample.user_count.is_none());
        assert!(sample.created_at.is_none());
        assert!(sample.start_date.is_none());
        assert!(sample.nsfw.is_none());
        assert!(sample.abbreviated_titles.is_empty());
        assert!(sample.rating_frequencies.is_empty());
        assert!(sample.slug.is_none());
    }

    #[test]
    fn test_integer_overflow_is_none() {
        #[derive(Deserialize)]
        struct Small {
            #[serde(default, deserialize_with = "uint")]
            n: Option<u8>,
        }
        let small: Small = serde_json::from_str(r#"{"n": 300}"#).unwrap();
        assert!(small.n.is_none());
    }

    #[test]
    fn test_date_accepts_full_timestamp() {
        assert_eq!(
            parse_date("2021-10-03T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2021, 10, 3)
        );
        assert!(parse_datetime("2021-10-03T12:30:00.000").is_some());
    }
}
