//! Service file rendering
//!
//! A service file holds, in order: the model imports, one documented async
//! function per endpoint, and the routing-tree literal binding each method at
//! each node to a thunk over those functions.

use crate::models::{HttpMethod, Model, Service, ServiceEndpoint, ServiceNode};
use crate::openapi::paths::ANY_PAYLOAD;
use crate::strings::{capitalize, encode_uri_component, indent};

/// Render the complete service file
pub fn convert_service(models: &[Model], service: &Service, fetch_module: &str) -> String {
    let mut parts = Vec::with_capacity(service.endpoints.len() + 2);
    parts.push(convert_model_import(&service.name, models, fetch_module));
    parts.extend(
        service
            .endpoints
            .iter()
            .map(|endpoint| format!("{}\n{}", convert_endpoint_comment(endpoint), convert_endpoint(endpoint))),
    );
    parts.push(convert_structure(service));
    parts.join("\n")
}

pub fn convert_model_import(name: &str, models: &[Model], fetch_module: &str) -> String {
    let mut result = Vec::with_capacity(models.len() + 4);
    result.push(format!("import {{ Service }} from '{}'", fetch_module));
    result.push("import {".to_string());
    result.extend(models.iter().map(|model| format!("{}{},", indent(1), model.name)));
    result.push(format!("}} from './{}.model'", name));
    result.push(String::new());
    result.join("\n")
}

pub fn convert_endpoint_comment(endpoint: &ServiceEndpoint) -> String {
    let mut result = vec!["/**".to_string()];
    result.push(format!(" * {} {}", method_label(endpoint), endpoint.url));
    result.push(format!(" * {}", endpoint.description));
    result.extend(
        endpoint
            .url_params()
            .iter()
            .map(|param| format!(" * @param {{{}}} {} - URL parameter", param.type_expr, param.name)),
    );
    if !endpoint.query_params().is_empty() {
        result.push(format!(" * @param {{{}}} query - Query parameters", query_fields(endpoint).join(",")));
    }
    result.push(" */".to_string());
    result.join("\n")
}

/// Render the async function issuing the request
pub fn convert_endpoint(endpoint: &ServiceEndpoint) -> String {
    let params = convert_endpoint_params(endpoint, true);
    let query_params = endpoint.query_params();
    let has_query = !query_params.is_empty();

    let mut result = Vec::new();
    result.push(format!(
        "export const {} = async (service:any{}{}) => {{",
        endpoint.name,
        if params.is_empty() { "" } else { ", " },
        params.join(", ")
    ));
    result.push(format!(
        "{}{} url = `{}{}`",
        indent(1),
        if has_query { "let" } else { "const" },
        endpoint.url.replace('{', "${"),
        if has_query { "?" } else { "" }
    ));

    if has_query {
        result.push(format!("{}const urlQueryParams = []", indent(1)));
        for param in query_params {
            let push = format!(
                "urlQueryParams.push(`{}=${{encodeURIComponent(String(query['{}']))}}`)",
                encode_uri_component(&param.name),
                param.name
            );
            if param.required {
                result.push(format!("{}{}", indent(1), push));
            } else {
                result.push(format!("{}if (typeof query['{}'] !== 'undefined') {{", indent(1), param.name));
                result.push(format!("{}{}", indent(2), push));
                result.push(format!("{}}}", indent(1)));
            }
        }
        result.push(format!("{}url += urlQueryParams.join('&')", indent(1)));
    }

    result.push(format!("{}const options = {{", indent(1)));
    result.push(format!("{}method: '{}',", indent(2), method_label(endpoint)));
    if let Some(payload_type) = &endpoint.payload_type {
        if payload_type == ANY_PAYLOAD {
            result.push(format!("{}body: payload,", indent(2)));
        } else {
            result.push(format!("{}body: JSON.stringify(payload),", indent(2)));
        }
    }
    result.push(format!("{}}}", indent(1)));
    result.push(format!("{}const response = await service.fetch(url, options)", indent(1)));
    result.push(format!("{}const responseData = await response.json()", indent(1)));
    result.push(format!("{}return responseData", indent(1)));
    result.push("}".to_string());
    result.push(String::new());
    result.join("\n")
}

/// Positional parameters of an endpoint function, after `service`
///
/// With `show_type` each parameter carries its type annotation.
pub fn convert_endpoint_params(endpoint: &ServiceEndpoint, show_type: bool) -> Vec<String> {
    let mut params: Vec<String> = endpoint
        .url_params()
        .iter()
        .map(|param| {
            if show_type {
                format!("{}:{}", param.name, param.type_expr)
            } else {
                param.name.clone()
            }
        })
        .collect();

    if !endpoint.query_params().is_empty() {
        if show_type {
            params.push(format!("query:{{{}}}", query_fields(endpoint).join(", ")));
        } else {
            params.push("query".to_string());
        }
    }

    if let Some(payload_type) = &endpoint.payload_type {
        if show_type {
            params.push(format!("payload:{}", payload_type));
        } else {
            params.push("payload".to_string());
        }
    }

    params
}

/// Render the service factory wrapping the routing tree
pub fn convert_structure(service: &Service) -> String {
    let factory = format!("{}Service", capitalize(&service.name));
    [
        format!("const {} = (config: any) => {{", factory),
        format!("{}const service = new Service(config, '{}', {{", indent(1), service.url_base),
        convert_structure_nodes(service, 2, &service.structure),
        format!("{}}})", indent(1)),
        format!("{}return service", indent(1)),
        "}".to_string(),
        format!("export default {}", factory),
        String::new(),
    ]
    .join("\n")
}

pub fn convert_structure_nodes(service: &Service, depth: usize, nodes: &[ServiceNode]) -> String {
    nodes
        .iter()
        .map(|node| convert_structure_node(service, depth, node))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn convert_structure_node(service: &Service, depth: usize, node: &ServiceNode) -> String {
    let mut result = vec![format!("{}'{}': {{", indent(depth), node.name)];
    for method in HttpMethod::ALL {
        if let Some(handler) = node.handler(method) {
            result.push(convert_structure_node_endpoint(service, depth + 1, method, handler));
        }
    }
    result.extend(node.nodes.iter().map(|child| convert_structure_node(service, depth + 1, child)));
    result.push(format!("{}}},", indent(depth)));
    result.join("\n")
}

/// One `method: (typed params) => fn(service, params),` binding
pub fn convert_structure_node_endpoint(service: &Service, depth: usize, method: HttpMethod, handler: &str) -> String {
    let (params_types, params) = match service.endpoint(handler) {
        Some(endpoint) => (convert_endpoint_params(endpoint, true), convert_endpoint_params(endpoint, false)),
        None => (Vec::new(), Vec::new()),
    };
    format!(
        "{}{}: ({}) => {}(service{}{}),",
        indent(depth),
        method.key(),
        params_types.join(", "),
        handler,
        if params.is_empty() { "" } else { ", " },
        params.join(", ")
    )
}

fn query_fields(endpoint: &ServiceEndpoint) -> Vec<String> {
    endpoint
        .query_params()
        .iter()
        .map(|param| format!("'{}'{}:{}", param.name, if param.required { "" } else { "?" }, param.type_expr))
        .collect()
}

fn method_label(endpoint: &ServiceEndpoint) -> &'static str {
    endpoint.method.map(HttpMethod::as_str).unwrap_or("undefined")
}
