//! Path walker
//!
//! Converts the `paths` map into a [`Service`]: a flat endpoint list plus the
//! routing tree mirroring the URL structure.

use serde_json::{Map, Value};
use tracing::debug;

use super::routing::{add_node, url_segments};
use super::types::property_type;
use crate::errors::{Result, SwaggenError};
use crate::models::{HttpMethod, Service, ServiceEndpoint, ServiceEndpointParameter};

/// Content types checked, in priority order, for a typed request body
const TYPED_PAYLOAD_CONTENT: [&str; 2] = ["application/json", "*/*"];

/// Content type sent as an opaque body
const MULTIPART_CONTENT: &str = "multipart/form-data";

/// Type used for bodies the generator cannot describe
pub const ANY_PAYLOAD: &str = "any";

/// Build the service for one API document
///
/// Path templates are visited in lexicographic order. Within a path item the
/// operations are checked in the fixed order post, get, put, delete.
pub fn build_paths(name: &str, url_base: &str, paths: &Map<String, Value>) -> Result<Service> {
    let mut service = Service::new(name, url_base);

    let mut urls: Vec<&String> = paths.keys().collect();
    urls.sort();

    for url in urls {
        let path_item = &paths[url];
        debug!("buildPath {}", url);

        let segments = url_segments(url);
        let node = add_node(&mut service.structure, segments.as_slice())?;

        for method in HttpMethod::ALL {
            let Some(operation) = path_item.get(method.key()).filter(|op| !op.is_null()) else {
                continue;
            };
            let endpoint = build_path_endpoint(url, method, operation)?;
            node.set_handler(method, endpoint.name.clone());
            service.endpoints.push(endpoint);
        }
    }

    Ok(service)
}

/// Build the endpoint for one operation
///
/// POST and PUT also resolve the payload type; GET and DELETE never do.
pub fn build_path_endpoint(url: &str, method: HttpMethod, operation: &Value) -> Result<ServiceEndpoint> {
    let mut endpoint = build_path_base(url, operation)?;
    endpoint.method = Some(method);
    if method.has_payload() {
        endpoint.payload_type = payload_type(operation.get("requestBody"))?;
    }
    Ok(endpoint)
}

/// Fields shared by every method
pub fn build_path_base(url: &str, operation: &Value) -> Result<ServiceEndpoint> {
    let operation_id = operation
        .get("operationId")
        .and_then(|o| o.as_str())
        .ok_or_else(|| SwaggenError::MissingField(format!("operationId for {}", url)))?;

    let parameters = operation.get("parameters").and_then(|p| p.as_array()).map(Vec::as_slice);
    let name = check_operation_id(operation_id);
    let description = operation
        .get("summary")
        .and_then(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| name.clone());

    Ok(ServiceEndpoint {
        name,
        description,
        url: url.to_string(),
        url_params: url_parameters(parameters)?,
        query_params: query_parameters(parameters)?,
        payload_type: None,
        method: None,
    })
}

/// Rename identifiers that collide with a reserved word of the output language
///
/// Only `delete` is rewritten.
pub fn check_operation_id(operation_id: &str) -> String {
    if operation_id == "delete" {
        return "delete_".to_string();
    }
    operation_id.to_string()
}

/// Parameters located in the path; `None` when there is no parameter list
///
/// Names go through [`check_operation_id`] since they become function arguments.
pub fn url_parameters(parameters: Option<&[Value]>) -> Result<Option<Vec<ServiceEndpointParameter>>> {
    located_parameters(parameters, "path")
        .map(|params| {
            params
                .into_iter()
                .map(|p| p.map(|p| ServiceEndpointParameter { name: check_operation_id(&p.name), ..p }))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()
}

/// Parameters located in the query string; `None` when there is no parameter list
pub fn query_parameters(parameters: Option<&[Value]>) -> Result<Option<Vec<ServiceEndpointParameter>>> {
    located_parameters(parameters, "query")
        .map(|params| params.into_iter().collect::<Result<Vec<_>>>())
        .transpose()
}

fn located_parameters(parameters: Option<&[Value]>, location: &str) -> Option<Vec<Result<ServiceEndpointParameter>>> {
    let parameters = parameters?;
    Some(
        parameters
            .iter()
            .filter(|param| param.get("in").and_then(|i| i.as_str()) == Some(location))
            .map(endpoint_parameter)
            .collect(),
    )
}

fn endpoint_parameter(param: &Value) -> Result<ServiceEndpointParameter> {
    let name = param
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| SwaggenError::MissingField("parameter name".to_string()))?;
    let required = param.get("required").and_then(|r| r.as_bool()).unwrap_or(false);
    let schema = param.get("schema").unwrap_or(&Value::Null);
    Ok(ServiceEndpointParameter::new(name, required, property_type(schema)?))
}

/// Resolve the type of a request body
///
/// `application/json` wins over `*/*`; a multipart-only body is untyped.
pub fn payload_type(request_body: Option<&Value>) -> Result<Option<String>> {
    let Some(request_body) = request_body else {
        return Ok(None);
    };
    let content = request_body.get("content").unwrap_or(&Value::Null);

    for media_type in TYPED_PAYLOAD_CONTENT {
        if let Some(media) = content.get(media_type) {
            let schema = media.get("schema").unwrap_or(&Value::Null);
            return property_type(schema).map(Some);
        }
    }

    if content.get(MULTIPART_CONTENT).is_some() {
        return Ok(Some(ANY_PAYLOAD.to_string()));
    }

    Err(SwaggenError::UnsupportedPayloadType)
}
