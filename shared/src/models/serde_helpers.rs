//! Serde helpers for backend data of uneven quality
//!
//! A field holding a value of the wrong shape is treated as absent instead of
//! failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize `T`, yielding `None` for null or a value of the wrong shape
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a string that treats null or a non-string as empty
pub fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = lenient(deserializer)?;
    Ok(value.unwrap_or_default())
}
