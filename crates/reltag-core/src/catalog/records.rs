use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// One entry of the series feed: a single episode or season upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Full release name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    /// Series name without release noise.
    #[serde(default, deserialize_with = "lenient_string")]
    pub series: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub season: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub episode: Option<u32>,
}

/// One entry of the movie feed, possibly with several uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub quality: Vec<String>,
    #[serde(default)]
    pub uploads: Vec<Upload>,
}

/// A forum thread carrying one release of a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    /// Full release name of this upload.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Forum thread id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub tid: Option<String>,
}

/// Both feeds of the search catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub series: Vec<SeriesRecord>,
    pub movies: Vec<MovieRecord>,
}

impl Catalog {
    /// Decodes the series and movie feeds.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::Json` if either payload is not valid JSON.
    /// Individual malformed entries are skipped, not reported.
    pub fn from_json(series_raw: &str, movies_raw: &str) -> Result<Self> {
        Ok(Self {
            series: decode_records(series_raw)?,
            movies: decode_records(movies_raw)?,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.movies.is_empty()
    }
}

/// Decodes a feed that may be a bare array, an object map of records, or
/// either of those wrapped in `{"data": ...}`.
///
/// # Errors
///
/// Returns `ReltagError::Json` if `raw` is not valid JSON.
pub fn decode_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(raw)?;

    let payload = match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };

    let entries: Vec<Value> = match payload {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };

    Ok(decode_entries(entries))
}

/// Decodes each entry on its own, skipping the ones that do not fit `T`.
pub(crate) fn decode_entries<T: DeserializeOwned>(entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(index, %error, "skipping malformed entry");
                None
            }
        })
        .collect()
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(0))
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .filter(|f: &f64| f.is_finite())
        .unwrap_or(0.0))
}

fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}
