//! swaggen library interface
//!
//! Generates typed TypeScript client modules from OpenAPI 3 descriptions.
//!
//! # Module Organization
//!
//! - [`openapi`] - Document loading and the schema/path walkers
//! - [`models`] - Intermediate representation (Model, Service, ServiceNode)
//! - [`output`] - TypeScript rendering and artifact writing
//! - [`errors`] - Error types (SwaggenError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Batch driver

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod output;
pub mod status;
pub mod strings;
