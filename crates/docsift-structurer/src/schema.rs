//! Record schema validation
//!
//! A valid record is a non-empty JSON object whose entries are either party
//! groups (objects keyed by customer name) or summary scalars. Party fields
//! are scalars or flat arrays of scalars, and the line-item arrays of one
//! party run in parallel.

use docsift_domain::StructuredRecord;
use serde_json::{Map, Value};
use thiserror::Error;

/// Party fields that hold one value per line item, compared case-insensitively
pub const LINE_ITEM_FIELDS: &[&str] = &[
    "serial number",
    "product name",
    "item",
    "quantity",
    "qty",
    "tax",
    "tax (%)",
    "tax amount",
    "total amount",
    "item total amount",
    "price with tax",
];

/// Ways a parsed reply can fail the record schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// The reply is JSON but not an object
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    /// The reply is an object with no entries
    #[error("record has no entries")]
    Empty,

    /// A top-level entry is an array
    #[error("top-level entry '{0}' is an array; arrays belong inside a party group")]
    TopLevelArray(String),

    /// A party field holds an object or an array containing non-scalars
    #[error("field '{field}' of '{party}' holds a nested {kind}")]
    Nested {
        /// Party group key
        party: String,
        /// Field key
        field: String,
        /// JSON kind found where a scalar was expected
        kind: &'static str,
    },

    /// Line-item arrays of one party differ in length
    #[error("line-item arrays of '{party}' differ in length: '{first}' has {first_len}, '{other}' has {other_len}")]
    RaggedLineItems {
        /// Party group key
        party: String,
        /// First line-item array seen
        first: String,
        /// Its length
        first_len: usize,
        /// The array whose length disagrees
        other: String,
        /// Its length
        other_len: usize,
    },
}

/// Validate a parsed reply and wrap it as a record
pub fn validate_record(value: Value) -> Result<StructuredRecord, SchemaViolation> {
    let map = match value {
        Value::Object(map) => map,
        other => return Err(SchemaViolation::NotAnObject(kind_of(&other))),
    };

    if map.is_empty() {
        return Err(SchemaViolation::Empty);
    }

    for (key, entry) in &map {
        match entry {
            Value::Object(fields) => validate_party(key, fields)?,
            Value::Array(_) => return Err(SchemaViolation::TopLevelArray(key.clone())),
            _ => {}
        }
    }

    Ok(StructuredRecord::from_map(map))
}

fn validate_party(party: &str, fields: &Map<String, Value>) -> Result<(), SchemaViolation> {
    // (field, len) of the first line-item array in this group
    let mut first_line_item: Option<(&str, usize)> = None;

    for (field, value) in fields {
        let nested = |kind| SchemaViolation::Nested {
            party: party.to_string(),
            field: field.clone(),
            kind,
        };

        let items = match value {
            Value::Object(_) => return Err(nested("object")),
            Value::Array(items) => items,
            _ => continue,
        };

        if let Some(item) = items.iter().find(|item| !is_scalar(item)) {
            return Err(nested(kind_of(item)));
        }

        // `[]` stands for an absent field, like `null`
        if items.is_empty() || !is_line_item_field(field) {
            continue;
        }

        match first_line_item {
            None => first_line_item = Some((field, items.len())),
            Some((first, first_len)) if first_len != items.len() => {
                return Err(SchemaViolation::RaggedLineItems {
                    party: party.to_string(),
                    first: first.to_string(),
                    first_len,
                    other: field.clone(),
                    other_len: items.len(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn is_line_item_field(field: &str) -> bool {
    let field = field.trim();
    LINE_ITEM_FIELDS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(field))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
