//! Intermediate representation produced by the walkers
//!
//! The schema walker produces [`Model`]s and the path walker produces a
//! [`Service`]. Both are plain data: the emitter renders them to text and
//! nothing mutates them after the walkers return.

use serde::Serialize;

/// A named data shape rendered as an interface declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
    pub name: String,
    pub description: String,
    /// Sorted by property key
    pub properties: Vec<ModelProperty>,
    /// Referenced model names for `allOf` composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
}

/// One field of a [`Model`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelProperty {
    pub name: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub type_expr: String,
}

impl ModelProperty {
    pub fn new(name: impl Into<String>, required: bool, type_expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required,
            type_expr: type_expr.into(),
        }
    }
}

/// A call parameter; same shape as a model property
pub type ServiceEndpointParameter = ModelProperty;

/// HTTP methods wired into the generated client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Get,
    Put,
    Delete,
}

impl HttpMethod {
    /// Fixed check order used when walking a path item
    pub const ALL: [HttpMethod; 4] = [HttpMethod::Post, HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete];

    /// Key of the operation in an OpenAPI path item
    pub fn key(self) -> &'static str {
        match self {
            HttpMethod::Post => "post",
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the method carries a request body
    pub fn has_payload(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// One operation of a [`Service`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    pub name: String,
    pub description: String,
    /// Path template with `{param}` placeholders
    pub url: String,
    /// `None` when the operation declares no `parameters` array at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_params: Option<Vec<ServiceEndpointParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<Vec<ServiceEndpointParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

impl ServiceEndpoint {
    pub fn url_params(&self) -> &[ServiceEndpointParameter] {
        self.url_params.as_deref().unwrap_or_default()
    }

    pub fn query_params(&self) -> &[ServiceEndpointParameter] {
        self.query_params.as_deref().unwrap_or_default()
    }
}

/// One URL segment of the routing tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceNode {
    /// Raw segment, used as the lookup key
    pub id: String,
    /// Display name; `{x}` segments become `$x`
    pub name: String,
    pub nodes: Vec<ServiceNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
}

impl ServiceNode {
    pub fn new(segment: &str) -> Self {
        let name = match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => format!("${}", param),
            None => segment.to_string(),
        };
        Self {
            id: segment.to_string(),
            name,
            nodes: Vec::new(),
            post: None,
            get: None,
            put: None,
            delete: None,
        }
    }

    /// Endpoint name bound to `method` at this node
    pub fn handler(&self, method: HttpMethod) -> Option<&str> {
        match method {
            HttpMethod::Post => self.post.as_deref(),
            HttpMethod::Get => self.get.as_deref(),
            HttpMethod::Put => self.put.as_deref(),
            HttpMethod::Delete => self.delete.as_deref(),
        }
    }

    pub fn set_handler(&mut self, method: HttpMethod, endpoint: String) {
        let slot = match method {
            HttpMethod::Post => &mut self.post,
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
        };
        *slot = Some(endpoint);
    }
}

/// The generated client surface for one API document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub url_base: String,
    pub endpoints: Vec<ServiceEndpoint>,
    pub structure: Vec<ServiceNode>,
}

impl Service {
    pub fn new(name: impl Into<String>, url_base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_base: url_base.into(),
            endpoints: Vec::new(),
            structure: Vec::new(),
        }
    }

    pub fn endpoint(&self, name: &str) -> Option<&ServiceEndpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }
}
