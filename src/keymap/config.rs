//! YAML form of persisted bindings
//!
//! A keymap file is a list of binding records:
//!
//! ```yaml
//! bindings:
//!   - action: HyperRateSetRate
//!     is_user_defined: true
//!     key_combination: "[Ctrl][F]"
//!     value: 5
//!   - action: WarpToVesselOrbitLocation
//!     key_combination: "[None]"
//!     value: 60
//!     location: Periapsis
//! ```
//!
//! Records are kept as loosely typed values until each one is decoded on its
//! own, so a malformed entry never prevents the rest of the file from loading.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::keymap::BindingId;

/// A single persisted binding
///
/// Field values stay textual here; the factory validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Catalog name of the action kind
    pub action: String,
    /// Anything other than `true` (or the text `"true"`) reads as built-in
    #[serde(default, deserialize_with = "flag")]
    pub is_user_defined: bool,
    /// Chord text, e.g. `[Ctrl][F]`
    #[serde(default = "unassigned", deserialize_with = "chord_text")]
    pub key_combination: String,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        serialize_with = "number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// Sub-discriminator of location-targeted warps
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    /// Sub-discriminator of time-increment warps
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_unit: Option<String>,
}

fn unassigned() -> String {
    "[None]".to_string()
}

/// Accept any YAML scalar as text so that type mismatches surface as
/// per-field validation errors rather than whole-record decode failures
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_yaml::Value::Null) => None,
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => {
            Some(n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()))
        }
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(format!("{:?}", other)),
    })
}

/// Chord text from any scalar; a null chord becomes empty text, which fails
/// to parse and loads the binding unassigned
fn chord_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.unwrap_or_default())
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Bool(b) => b,
        serde_yaml::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Write numeric text as a YAML number, anything else as a string
fn number_or_text<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(text) => match text.parse::<f64>() {
            Ok(n) => serializer.serialize_f64(n),
            Err(_) => serializer.serialize_str(text),
        },
        None => serializer.serialize_none(),
    }
}

/// Root structure of a keymap YAML file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeymapFile {
    #[serde(default)]
    pub bindings: Vec<serde_yaml::Value>,
}

/// Outcome of decoding one entry of a keymap file
pub type RecordResult = Result<BindingRecord, KeymapError>;

/// Parse a keymap YAML string into per-entry decode results
///
/// Fails only when the document itself is not a keymap; individual entries
/// that do not decode are returned as errors in place.
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<RecordResult>, KeymapError> {
    let file: KeymapFile =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    Ok(file
        .bindings
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_yaml::from_value::<BindingRecord>(entry).map_err(|e| {
                KeymapError::MalformedRecord {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect())
}

/// Serialize records into a keymap YAML document
pub fn records_to_yaml(records: &[BindingRecord]) -> Result<String, KeymapError> {
    let bindings = records
        .iter()
        .map(serde_yaml::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| KeymapError::Serialize(e.to_string()))?;

    serde_yaml::to_string(&KeymapFile { bindings })
        .map_err(|e| KeymapError::Serialize(e.to_string()))
}

/// Errors that can occur when reading, writing or editing keymaps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("binding entry #{index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("no binding with id {0}")]
    UnknownBinding(BindingId),
    #[error("binding {0} is built-in and cannot be deleted")]
    BuiltIn(BindingId),
}
