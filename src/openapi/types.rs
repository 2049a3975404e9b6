//! Type resolution for schema properties
//!
//! Turns a single property description (`type`, `enum`, `items`, `$ref`,
//! `oneOf`) into the type expression written to the generated client.

use serde_json::Value;

use crate::errors::{Result, SwaggenError};
use crate::strings::capitalize;

/// Prefix of references into `components/schemas`
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Resolve a property description to a type expression
///
/// Checked in order: `type`, then `$ref`, then `oneOf`.
pub fn property_type(property: &Value) -> Result<String> {
    if let Some(schema_type) = property.get("type") {
        let schema_type = schema_type.as_str().ok_or(SwaggenError::UnsupportedProperty)?;
        return match schema_type {
            "string" => match property.get("enum").and_then(|e| e.as_array()) {
                Some(values) => Ok(enum_union(values)),
                None => Ok(capitalize(schema_type)),
            },
            "integer" => Ok("Number".to_string()),
            "array" => {
                let items = property.get("items").ok_or(SwaggenError::UnsupportedArrayProperty)?;
                Ok(format!("Array<{}>", property_type(items)?))
            }
            other => Ok(capitalize(other)),
        };
    }

    if let Some(reference) = property.get("$ref").and_then(|r| r.as_str()) {
        return Ok(ref_name(reference).to_string());
    }

    if let Some(members) = property.get("oneOf").and_then(|o| o.as_array()) {
        let types = members.iter().map(property_type).collect::<Result<Vec<_>>>()?;
        return Ok(types.join(" | "));
    }

    Err(SwaggenError::UnsupportedProperty)
}

/// Model name a `$ref` points at
pub fn ref_name(reference: &str) -> &str {
    match reference.strip_prefix(SCHEMA_REF_PREFIX) {
        Some(name) => name,
        None => reference.rsplit('/').next().unwrap_or(reference),
    }
}

fn enum_union(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v.as_str() {
            Some(s) => format!("'{}'", s),
            None => format!("'{}'", v),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
