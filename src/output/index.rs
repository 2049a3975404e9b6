//! Index file rendering

use crate::strings::{capitalize, indent};

/// Per-service index re-exporting the model namespace and service factory
pub fn convert_index(name: &str) -> String {
    [
        format!("import Service from './{}.service'", name),
        format!("import * as Model from './{}.model'", name),
        String::new(),
        "export default {".to_string(),
        "    Model,".to_string(),
        "    Service,".to_string(),
        "}".to_string(),
        String::new(),
    ]
    .join("\n")
}

/// Global index aggregating every generated service
pub fn convert_global_index<S: AsRef<str>>(services: &[S]) -> String {
    let names: Vec<String> = services.iter().map(|s| capitalize(s.as_ref())).collect();

    let mut result = Vec::new();
    result.extend(
        services
            .iter()
            .zip(&names)
            .map(|(service, name)| format!("import {} from './services/{}'", name, service.as_ref())),
    );
    result.push(String::new());
    result.extend(names.iter().map(|name| format!("export const {0}Service = {0}.Service", name)));
    result.push(String::new());
    result.extend(names.iter().map(|name| format!("export const {0}Model = {0}.Model", name)));
    result.push(String::new());
    result.push("export default {".to_string());
    result.extend(names.iter().map(|name| format!("{}{},", indent(1), name)));
    result.push("}".to_string());
    result.push(String::new());
    result.join("\n")
}
