//! OpenAPI walkers
//!
//! Turns an OpenAPI description into the generator's intermediate
//! representation: [`Model`](crate::models::Model)s from `components.schemas`
//! and a [`Service`](crate::models::Service) from `paths`.

mod document;
pub mod paths;
pub mod routing;
pub mod schemas;
pub mod types;

pub use document::{ApiDocument, is_document_file};
pub use paths::{build_paths, check_operation_id};
pub use routing::add_node;
pub use schemas::build_schemas;
pub use types::property_type;
