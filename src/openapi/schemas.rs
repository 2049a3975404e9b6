//! Schema walker
//!
//! Converts `components.schemas` into [`Model`]s. Keys are always visited in
//! lexicographic order so the output does not depend on document key order.

use serde_json::{Map, Value};
use tracing::debug;

use super::types::property_type;
use crate::errors::{Result, SwaggenError};
use crate::models::{Model, ModelProperty};

/// Placeholder parents for an object schema that declares nothing
pub const UNDECLARED_OBJECT_EXTENDS: [&str; 2] = ["Object", "Array<any>"];

/// Outcome of folding an `allOf` list
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AllOf {
    pub ext: Option<Vec<String>>,
    pub properties: Option<Vec<ModelProperty>>,
}

/// Build one model per schema, sorted by schema key
pub fn build_schemas(schemas: &Map<String, Value>) -> Result<Vec<Model>> {
    sorted_keys(schemas)
        .into_iter()
        .map(|key| build_schema(key, &schemas[key]))
        .collect()
}

/// Build the model for a single schema
///
/// Only `object` schemas are supported. An object without `properties` or
/// `allOf` degrades to [`UNDECLARED_OBJECT_EXTENDS`].
pub fn build_schema(key: &str, schema: &Value) -> Result<Model> {
    debug!("buildSchema {}", key);

    let description = ["title", "description"]
        .iter()
        .filter_map(|field| schema.get(*field).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .unwrap_or(key)
        .to_string();

    let mut model = Model {
        name: key.to_string(),
        description,
        properties: Vec::new(),
        extends: None,
    };

    match schema.get("type").and_then(|t| t.as_str()) {
        Some("object") => {
            let required = required_list(schema);
            if let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) {
                model.properties = build_schema_properties(properties, &required)?;
            } else if let Some(all_of) = schema.get("allOf").and_then(|a| a.as_array()) {
                let all_of = build_schema_all_of(all_of, &required)?;
                model.extends = all_of.ext;
                model.properties = all_of.properties.unwrap_or_default();
            } else {
                model.extends = Some(UNDECLARED_OBJECT_EXTENDS.iter().map(|s| s.to_string()).collect());
            }
        }
        other => {
            return Err(SwaggenError::UnsupportedSchemaType {
                key: key.to_string(),
                schema_type: type_label(other, schema.get("type")),
            });
        }
    }

    Ok(model)
}

/// Resolve every property of an object schema, sorted by key
pub fn build_schema_properties(properties: &Map<String, Value>, required: &[&str]) -> Result<Vec<ModelProperty>> {
    sorted_keys(properties)
        .into_iter()
        .map(|key| {
            let is_required = required.contains(&key.as_str());
            build_object_property(key, &properties[key], is_required)
        })
        .collect()
}

/// Fold an `allOf` list left to right
///
/// `$ref` entries extend the model; entries with `properties` contribute
/// their (sorted) properties. Anything else is rejected.
pub fn build_schema_all_of(all_of: &[Value], required: &[&str]) -> Result<AllOf> {
    all_of.iter().try_fold(AllOf::default(), |mut acc, item| {
        if item.get("$ref").and_then(|r| r.as_str()).is_some() {
            acc.ext.get_or_insert_with(Vec::new).push(property_type(item)?);
        } else if let Some(properties) = item.get("properties").and_then(|p| p.as_object()) {
            let resolved = build_schema_properties(properties, required)?;
            acc.properties.get_or_insert_with(Vec::new).extend(resolved);
        } else {
            return Err(SwaggenError::UnsupportedAllOfEntry);
        }
        Ok(acc)
    })
}

pub fn build_object_property(key: &str, property: &Value, required: bool) -> Result<ModelProperty> {
    debug!("  - buildProperty {}", key);
    Ok(ModelProperty::new(key, required, property_type(property)?))
}

fn required_list(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default()
}

fn sorted_keys(map: &Map<String, Value>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys
}

fn type_label(schema_type: Option<&str>, raw: Option<&Value>) -> String {
    match (schema_type, raw) {
        (Some(t), _) => t.to_string(),
        (None, Some(v)) => v.to_string(),
        (None, None) => "undefined".to_string(),
    }
}
