//! Scalar cell values and raw-text coercion.
//!
//! Every cell of a [`crate::Table`] is a [`Value`]. Missing data is an explicit
//! variant, so a numeric zero or a non-empty string is never mistaken for a gap.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Date-only layouts accepted by [`parse_date`].
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%Y年%m月%d日",
];

/// Date-time layouts accepted by [`parse_date`].
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    #[default]
    Missing,
}

impl Value {
    /// Coerce raw cell text into a typed value.
    ///
    /// Blank text becomes [`Value::Missing`]. Numeric parsing takes priority
    /// over date parsing; anything else stays text.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Some(number) = parse_number(trimmed) {
            return Self::Number(number);
        }
        if let Some(date) = parse_date(trimmed) {
            return Self::Date(date);
        }
        Self::Text(trimmed.to_string())
    }

    /// Re-run raw coercion on text cells. Typed cells pass through unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Text(text) => Self::from_raw(&text),
            other => other,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the number held by a [`Value::Number`] cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a number for numeric cells and for text that parses as one.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_number(text),
            _ => None,
        }
    }

    /// Returns a date-time for date cells and for text that parses as one.
    pub fn coerce_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(value) => Some(*value),
            Self::Text(text) => parse_date(text),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, used in log fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => f.write_str(&format_date(date)),
            Self::Missing => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) if value.is_finite() => serializer.serialize_f64(*value),
            Self::Number(_) | Self::Missing => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Date(date) => serializer.serialize_str(&format_date(date)),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, boolean or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Number(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(Value::Number(value as f64))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Text(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::Text(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Missing)
    }
}

/// Parse text that is a complete, finite number.
///
/// `"inf"` and `"NaN"` are rejected so they stay categorical labels.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse text as a calendar date or date-time.
///
/// Accepts ISO 8601 / RFC 3339 values, slash and dot separated dates,
/// US `MM/DD/YYYY` dates and year-month values (`2024-03`, resolved to the
/// first day of the month).
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }
    parse_year_month(trimmed)
}

fn parse_year_month(value: &str) -> Option<NaiveDateTime> {
    let (year, month) = value.split_once(['-', '/'])?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.and_time(NaiveTime::MIN))
}

/// Render a date as `YYYY-MM-DD`, adding the time only when it is not midnight.
pub fn format_date(date: &NaiveDateTime) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(Value::from_raw(""), Value::Missing);
        assert_eq!(Value::from_raw("   "), Value::Missing);
    }

    #[test]
    fn numbers_win_over_dates() {
        assert_eq!(Value::from_raw("2020"), Value::Number(2020.0));
        assert_eq!(Value::from_raw(" -1.5e2 "), Value::Number(-150.0));
        assert_eq!(Value::from_raw("0"), Value::Number(0.0));
    }

    #[test]
    fn dates_are_recognized() {
        assert_eq!(Value::from_raw("2024-01-15"), Value::Date(date(2024, 1, 15)));
        assert_eq!(Value::from_raw("2024/01/15"), Value::Date(date(2024, 1, 15)));
        assert_eq!(Value::from_raw("01/15/2024"), Value::Date(date(2024, 1, 15)));
        assert_eq!(Value::from_raw("2024-03"), Value::Date(date(2024, 3, 1)));
        assert!(matches!(
            Value::from_raw("2024-01-15T08:30:00Z"),
            Value::Date(_)
        ));
    }

    #[test]
    fn non_finite_words_stay_text() {
        assert_eq!(Value::from_raw("NaN"), Value::Text("NaN".to_string()));
        assert_eq!(Value::from_raw("inf"), Value::Text("inf".to_string()));
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn invalid_year_month_is_text() {
        assert_eq!(parse_date("2024-13"), None);
        assert_eq!(parse_date("24-1"), None);
        assert_eq!(Value::from_raw("east"), Value::Text("east".to_string()));
    }

    #[test]
    fn display_matches_cell_text() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Date(date(2023, 12, 31)).to_string(), "2023-12-31");
        assert_eq!(Value::Missing.to_string(), "");
    }

    #[test]
    fn normalize_keeps_typed_cells() {
        assert_eq!(Value::Number(1.0).normalize(), Value::Number(1.0));
        assert_eq!(
            Value::Text("4.5".to_string()).normalize(),
            Value::Number(4.5)
        );
    }

    #[test]
    fn coerce_number_reads_numeric_text() {
        assert_eq!(Value::Text("7".to_string()).coerce_number(), Some(7.0));
        assert_eq!(Value::Missing.coerce_number(), None);
        assert_eq!(Value::Date(date(2020, 1, 1)).coerce_number(), None);
    }
}
