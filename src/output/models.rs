//! Model file rendering

use crate::models::{Model, ModelProperty};
use crate::strings::indent;

/// Render every model, one block each, joined by a newline
pub fn convert_models(models: &[Model]) -> String {
    models.iter().map(convert_model).collect::<Vec<_>>().join("\n")
}

/// Render one model as an interface declaration
pub fn convert_model(model: &Model) -> String {
    let mut result = Vec::with_capacity(model.properties.len() + 3);
    result.push(format!("// {}", model.description));

    let extends = match &model.extends {
        Some(ext) => format!("extends {} ", ext.join(", ")),
        None => String::new(),
    };
    result.push(format!("export interface {} {}{{", model.name, extends));

    result.extend(model.properties.iter().map(convert_model_property));
    result.push("}".to_string());
    result.join("\n")
}

pub fn convert_model_property(property: &ModelProperty) -> String {
    format!(
        "{}'{}'{}: {}",
        indent(1),
        property.name,
        if property.required { "" } else { "?" },
        property.type_expr
    )
}
