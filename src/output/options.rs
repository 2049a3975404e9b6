//! Emitter options

/// Module the generated service files import `Service` from
pub const DEFAULT_FETCH_MODULE: &str = "@uncover/js-utils-fetch";

/// Options shared by the renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub fetch_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            fetch_module: DEFAULT_FETCH_MODULE.to_string(),
        }
    }
}
