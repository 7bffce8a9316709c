//! Attribute spec normalization.
//!
//! Callers hand the entry point one of four shapes: a single attribute
//! name, a list of names, a nested map, or (anything else) an invalid
//! spec. All shapes normalize once, here, into the canonical
//! [`AttributeSpec`]. Association entries are recognized by the
//! `_attributes` key-suffix convention during normalization only; the
//! walker dispatches on the resulting tags and never re-parses strings.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Key suffix marking an association entry in structured input.
pub const ASSOCIATION_SUFFIX: &str = "_attributes";

#[derive(Debug, Error, PartialEq)]
pub enum SpecError {
    #[error("attributes must be a map, array, or string: {0}")]
    InvalidSpec(String),
}

/// Caller-facing input, prior to normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecInput {
    /// A single plain attribute name.
    Name(String),
    /// A flat list of plain attribute names.
    Names(Vec<String>),
    /// A structured (possibly nested) spec as a JSON value.
    Structured(Value),
}

impl From<&str> for SpecInput {
    fn from(name: &str) -> Self {
        SpecInput::Name(name.to_string())
    }
}

impl From<String> for SpecInput {
    fn from(name: String) -> Self {
        SpecInput::Name(name)
    }
}

impl From<Vec<String>> for SpecInput {
    fn from(names: Vec<String>) -> Self {
        SpecInput::Names(names)
    }
}

impl From<Vec<&str>> for SpecInput {
    fn from(names: Vec<&str>) -> Self {
        SpecInput::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Value> for SpecInput {
    fn from(value: Value) -> Self {
        SpecInput::Structured(value)
    }
}

/// Canonical, normalized spec: an ordered set of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSpec {
    entries: Vec<SpecEntry>,
}

/// One normalized spec entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecEntry {
    /// A leaf attribute checked against the error collection.
    Plain(String),
    /// An association to recurse into. `name` has the suffix stripped.
    Association { name: String, spec: AssociationSpec },
}

/// How an association entry scopes its sub-spec.
#[derive(Debug, Clone, PartialEq)]
pub enum AssociationSpec {
    /// Singular association: one sub-spec for the nested model.
    Nested(AttributeSpec),
    /// Indexed collection: sub-specs keyed by collection index, keys kept
    /// as strings exactly as received.
    Indexed(IndexMap<String, AttributeSpec>),
}

impl AttributeSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpecInput {
    /// Normalize into the canonical shape, rejecting unsupported input.
    pub fn normalize(&self) -> Result<AttributeSpec, SpecError> {
        match self {
            SpecInput::Name(name) => Ok(AttributeSpec {
                entries: vec![SpecEntry::Plain(name.clone())],
            }),
            SpecInput::Names(names) => Ok(AttributeSpec {
                entries: names.iter().cloned().map(SpecEntry::Plain).collect(),
            }),
            SpecInput::Structured(Value::Null) => {
                Err(SpecError::InvalidSpec("null".to_string()))
            }
            SpecInput::Structured(value) => normalize_value(value),
        }
    }
}

fn normalize_value(value: &Value) -> Result<AttributeSpec, SpecError> {
    match value {
        Value::String(name) => Ok(AttributeSpec {
            entries: vec![SpecEntry::Plain(name.clone())],
        }),
        Value::Array(_) => {
            let mut entries = Vec::new();
            collect_names(value, &mut entries)?;
            Ok(AttributeSpec { entries })
        }
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, sub) in map {
                entries.push(normalize_entry(key, sub)?);
            }
            Ok(AttributeSpec { entries })
        }
        // Null sub-specs appear under association keys in nested maps;
        // they carry no attributes to check.
        Value::Null => Ok(AttributeSpec::empty()),
        other => Err(SpecError::InvalidSpec(other.to_string())),
    }
}

/// Flatten (possibly nested) arrays of names, exactly one plain entry per
/// name.
fn collect_names(value: &Value, out: &mut Vec<SpecEntry>) -> Result<(), SpecError> {
    match value {
        Value::String(name) => {
            out.push(SpecEntry::Plain(name.clone()));
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                collect_names(item, out)?;
            }
            Ok(())
        }
        other => Err(SpecError::InvalidSpec(other.to_string())),
    }
}

fn normalize_entry(key: &str, sub: &Value) -> Result<SpecEntry, SpecError> {
    let Some(name) = association_name(key) else {
        return Ok(SpecEntry::Plain(key.to_string()));
    };
    let spec = match sub {
        Value::Object(map) if is_index_map(map) => {
            let mut indexed = IndexMap::with_capacity(map.len());
            for (index, sub_spec) in map {
                indexed.insert(index.clone(), normalize_value(sub_spec)?);
            }
            AssociationSpec::Indexed(indexed)
        }
        other => AssociationSpec::Nested(normalize_value(other)?),
    };
    Ok(SpecEntry::Association {
        name: name.to_string(),
        spec,
    })
}

/// An association key is a non-empty name followed by the suffix.
fn association_name(key: &str) -> Option<&str> {
    key.strip_suffix(ASSOCIATION_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Indexed sub-maps are non-empty objects whose keys are all base-10
/// collection indices.
fn is_index_map(map: &serde_json::Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|key| key.parse::<usize>().is_ok())
}
