//! Output rendering and writing
//!
//! Every `convert_*` function is a pure function of its input; writing goes
//! through [`writer::ArtifactSink`].

pub mod index;
pub mod models;
pub mod options;
pub mod service;
pub mod writer;

pub use options::EmitOptions;
pub use writer::{Artifact, ArtifactSink, DryRunSink, FileSink, ServiceLayout, global_index_path};

use std::path::Path;

use crate::models::{Model, Service};

/// Render the model, service and index files of one service
pub fn render_service(output_dir: &Path, models: &[Model], service: &Service, options: &EmitOptions) -> Vec<Artifact> {
    let layout = ServiceLayout::new(output_dir, &service.name);
    vec![
        Artifact::new(layout.model, models::convert_models(models)),
        Artifact::new(layout.service, service::convert_service(models, service, &options.fetch_module)),
        Artifact::new(layout.index, index::convert_index(&service.name)),
    ]
}

/// Render the index aggregating all services
pub fn render_global_index<S: AsRef<str>>(output_dir: &Path, services: &[S]) -> Artifact {
    Artifact::new(global_index_path(output_dir), index::convert_global_index(services))
}
