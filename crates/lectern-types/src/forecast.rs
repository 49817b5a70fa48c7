use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Shortest accepted forecast summary, in characters.
pub const SUMMARY_MIN_LEN: usize = 1;

/// Longest accepted forecast summary, in characters.
pub const SUMMARY_MAX_LEN: usize = 60;

/// Summaries used when seeding the store with random forecasts.
pub const SEED_SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Opaque key of a stored forecast.
///
/// Server-generated keys are UUID v7 strings, but PUT accepts any
/// client-supplied string, so the key is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastId(pub String);

impl ForecastId {
    /// Allocate a fresh server-side key (UUID v7, time-sortable).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForecastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ForecastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ForecastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Text stored for a forecast whose body carried no `date`.
pub const DEFAULT_DATE: &str = "0001-01-01T00:00:00";

/// Forecast timestamp that serializes back exactly as it was received.
///
/// Accepts RFC 3339 (any fractional precision, any offset) and ISO 8601
/// date-times without an offset, which are read as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDate {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl ForecastDate {
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => instant,
            Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| rfc_err)?,
        };
        Ok(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    /// The text as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

impl Default for ForecastDate {
    fn default() -> Self {
        let instant = NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap_or_default()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .fixed_offset();
        Self {
            raw: DEFAULT_DATE.to_string(),
            instant,
        }
    }
}

impl From<DateTime<Utc>> for ForecastDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            raw: value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            instant: value.fixed_offset(),
        }
    }
}

impl FromStr for ForecastDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for ForecastDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ForecastDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A stored weather forecast. The key lives outside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub date: ForecastDate,
    pub temperature_c: i32,
    pub summary: String,
}

impl ForecastRecord {
    /// Attach a key, producing the list/create response shape.
    pub fn with_id(self, id: ForecastId) -> ForecastResult {
        ForecastResult {
            id,
            date: self.date,
            summary: self.summary,
            temperature_c: self.temperature_c,
        }
    }

    /// Overwrite the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: UpdateForecastRequest) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(summary) = update.summary {
            self.summary = summary;
        }
        if let Some(temperature_c) = update.temperature_c {
            self.temperature_c = temperature_c;
        }
    }
}

/// A forecast together with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub id: ForecastId,
    pub date: ForecastDate,
    pub summary: String,
    pub temperature_c: i32,
}

/// Body of POST and PUT. Validation happens in the service, so `summary`
/// is optional here and reported by name when missing. A missing `date`
/// becomes [`ForecastDate::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForecastRequest {
    pub date: Option<ForecastDate>,
    pub summary: Option<String>,
    #[serde(default)]
    pub temperature_c: i32,
}

/// Body of PATCH. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForecastRequest {
    pub date: Option<ForecastDate>,
    pub summary: Option<String>,
    pub temperature_c: Option<i32>,
}

impl UpdateForecastRequest {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.summary.is_none() && self.temperature_c.is_none()
    }
}

/// Fixed error numbers carried in [`ErrorResponse::error_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorNumber {
    MustNotBeNull,
    LengthOutOfRange,
    InvalidBody,
}

impl ErrorNumber {
    pub fn code(self) -> i32 {
        match self {
            ErrorNumber::MustNotBeNull => 1,
            ErrorNumber::LengthOutOfRange => 2,
            ErrorNumber::InvalidBody => 3,
        }
    }
}

/// 400 response body naming the offending property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
    pub error_number: i32,
    pub property_name: String,
}
