use clap::Parser;
use console::style;
use indexmap::IndexSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::cli::Args;
use crate::config::Config;
use crate::errors::{Result, SwaggenError};
use crate::logging::init_tracing;
use crate::openapi::{ApiDocument, build_paths, build_schemas, is_document_file};
use crate::output::{Artifact, ArtifactSink, DryRunSink, EmitOptions, FileSink, render_global_index, render_service};
use crate::status::ExitStatus;

const ERROR_BANNER: &str = "*********************************************";

/// Main entry point for the CLI.
///
/// Loads configuration, parses arguments, installs logging and runs the
/// batch over every input document.
pub fn run(args: Vec<String>) -> ExitStatus {
    let explicit_config = config_argument(&args);
    let config = match Config::load(explicit_config.as_deref()) {
        Ok(config) => config,
        Err(e) if explicit_config.is_some() => {
            eprintln!("Error: {}", e);
            return ExitStatus::Error;
        }
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };

    let merged_args = merge_default_options(args, &config);

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_tracing(parsed.verbose, parsed.log_format.unwrap_or_default());

    match program(&parsed, &config) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitStatus::Error
        }
    }
}

/// Run the generator once arguments and configuration are known
pub fn program(args: &Args, config: &Config) -> Result<ExitStatus> {
    if !args.output.is_dir() {
        return Err(SwaggenError::Argument("output must point to a directory".to_string()));
    }

    let progress = Progress::new(args.quiet);
    let files = collect_documents(&args.files, &progress)?;

    let options = GenerateOptions {
        strip_server: args.strip_server.clone().or_else(|| config.strip_server.clone()),
        emit: EmitOptions {
            fetch_module: args.fetch_module.clone().unwrap_or_else(|| config.fetch_module.clone()),
        },
    };

    progress.line(format!("> output directory: '{}'", args.output.display()));

    let report = if args.dry_run {
        let mut sink = DryRunSink::new(io::stdout().lock());
        generate_batch(&files, &args.output, &options, &mut sink, &progress)?
    } else {
        generate_batch(&files, &args.output, &options, &mut FileSink, &progress)?
    };

    info!(
        generated = report.services.len(),
        failed = report.failures.len(),
        "Generation finished"
    );

    Ok(ExitStatus::from_failures(report.failures.len()))
}

/// Settings applied to every document of a batch
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Server prefix removed from `servers[0].url`
    pub strip_server: Option<String>,
    pub emit: EmitOptions,
}

/// Rendered output of one document
#[derive(Debug, Clone)]
pub struct GeneratedService {
    pub name: String,
    pub artifacts: Vec<Artifact>,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Services written, in processing order
    pub services: IndexSet<String>,
    /// Documents that failed, with the name they were reported under
    pub failures: Vec<(String, SwaggenError)>,
}

/// Generate every document, then the global index.
///
/// A failing document is reported and skipped; the remaining documents are
/// still processed. Only the global index write is fatal.
pub fn generate_batch(
    files: &[PathBuf],
    output_dir: &Path,
    options: &GenerateOptions,
    sink: &mut dyn ArtifactSink,
    progress: &Progress,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for file in files {
        progress.line(format!("> reading file '{}'", file.display()));

        let generated = match ApiDocument::load(file)
            .and_then(|document| generate_document(&document, output_dir, options))
        {
            Ok(generated) => generated,
            Err(e) => {
                let name = document_label(file);
                report_failure(&name, &e);
                report.failures.push((name, e));
                continue;
            }
        };

        progress.line(format!("  > building service: '{}'", generated.name));
        if let Err(e) = write_service(&generated, sink, progress) {
            // Earlier output under the same name was overwritten or removed
            if report.services.shift_remove(&generated.name) {
                warn!(service = %generated.name, "Dropping earlier output of service from the global index");
            }
            report_failure(&generated.name, &e);
            report.failures.push((generated.name, e));
            continue;
        }

        info!(service = %generated.name, file = %file.display(), "Generated service");
        if !report.services.insert(generated.name.clone()) {
            warn!(service = %generated.name, "Service generated twice, keeping the later document");
        }
    }

    progress.line("  > output global index");
    let names: Vec<&str> = report.services.iter().map(String::as_str).collect();
    sink.write(&render_global_index(output_dir, &names))?;

    Ok(report)
}

/// Build the models and service of one document and render its artifacts.
///
/// Nothing is written; a document that fails yields no artifacts at all.
pub fn generate_document(
    document: &ApiDocument,
    output_dir: &Path,
    options: &GenerateOptions,
) -> Result<GeneratedService> {
    let server_url = document.server_url()?;
    let name = service_name(server_url)?;
    let base = url_base(server_url, options.strip_server.as_deref());

    let models = build_schemas(&document.schemas())?;
    let service = build_paths(&name, &base, &document.paths())?;
    let artifacts = render_service(output_dir, &models, &service, &options.emit);

    Ok(GeneratedService { name, artifacts })
}

/// Service name: the last non-empty `/` segment of the server URL
pub fn service_name(server_url: &str) -> Result<String> {
    server_url
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .map(String::from)
        .ok_or_else(|| SwaggenError::MissingField("service name in servers[0].url".to_string()))
}

/// Base URL handed to the runtime `Service`.
///
/// A matching `strip_server` prefix is removed; otherwise the first `/`
/// segment (the scheme) is removed once, leaving a protocol-relative URL.
pub fn url_base(server_url: &str, strip_server: Option<&str>) -> String {
    if let Some(rest) = strip_server.and_then(|prefix| server_url.strip_prefix(prefix)) {
        return rest.to_string();
    }
    match server_url.find('/') {
        Some(index) => server_url[index..].to_string(),
        None => String::new(),
    }
}

/// Input documents: the file itself, or the documents of a directory sorted by name
pub fn collect_documents(path: &Path, progress: &Progress) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        progress.line(format!("> reading directory: '{}'", path.display()));
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let file = entry?.path();
            if file.is_file() && is_document_file(&file) {
                files.push(file);
            }
        }
        files.sort();
        for file in &files {
            progress.line(format!("  > file: '{}'", file.display()));
        }
        Ok(files)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(SwaggenError::Argument(format!("files not found: {}", path.display())))
    }
}

/// Write every artifact of a service; on failure, discard the ones already written
fn write_service(generated: &GeneratedService, sink: &mut dyn ArtifactSink, progress: &Progress) -> Result<()> {
    let labels = ["model", "service", "index"];
    for (written, (label, artifact)) in labels.iter().zip(&generated.artifacts).enumerate() {
        progress.line(format!("    > output {}: '{}'", label, artifact.path.display()));
        if let Err(e) = sink.write(artifact) {
            for artifact in &generated.artifacts[..written] {
                if let Err(discard_error) = sink.discard(artifact) {
                    warn!(path = %artifact.path.display(), error = %discard_error, "Failed to discard artifact");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

fn report_failure(name: &str, e: &SwaggenError) {
    eprintln!("{}", style(ERROR_BANNER).for_stderr().red());
    eprintln!("{} {}", style("error while loading service:").for_stderr().red().bold(), name);
    eprintln!("{}", e);
    error!(service = %name, error = %e, "Failed to generate service");
}

/// Name a document is reported under before its service name is known
fn document_label(file: &Path) -> String {
    ApiDocument::load(file)
        .ok()
        .and_then(|document| document.server_url().ok().and_then(|url| service_name(url).ok()))
        .unwrap_or_else(|| {
            file.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string())
        })
}

/// User-facing progress lines on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    quiet: bool,
}

impl Progress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn line(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", message.as_ref());
        }
    }
}

/// `--config` value from raw arguments, or the `SWAGGEN_CONFIG` environment variable
fn config_argument(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(value));
        }
    }
    std::env::var_os("SWAGGEN_CONFIG").map(PathBuf::from)
}

fn merge_default_options(args: Vec<String>, config: &Config) -> Vec<String> {
    if config.default_options.is_empty() {
        return args;
    }

    let mut merged = Vec::with_capacity(args.len() + config.default_options.len());

    if let Some(program) = args.first() {
        merged.push(program.clone());
    }

    merged.extend(config.default_options.iter().cloned());
    merged.extend(args.into_iter().skip(1));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn petstore() -> ApiDocument {
        ApiDocument::new(json!({
            "servers": [{ "url": "https://api.example.com/v1/pets" }],
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["id"],
                        "properties": { "id": { "type": "integer" } }
                    }
                }
            },
            "paths": {
                "/pets/{id}": {
                    "get": {
                        "operationId": "getPet",
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }
                        ]
                    }
                }
            }
        }))
    }

    #[test]
    fn test_service_name() {
        assert_eq!(service_name("https://api.example.com/v1/pets").unwrap(), "pets");
        assert_eq!(service_name("https://api.example.com/v1/pets/").unwrap(), "pets");
        assert!(matches!(service_name("///"), Err(SwaggenError::MissingField(_))));
    }

    #[test]
    fn test_url_base_strips_scheme() {
        assert_eq!(url_base("https://api.example.com/v1/pets", None), "//api.example.com/v1/pets");
        assert_eq!(url_base("/api/pets", None), "/api/pets");
        assert_eq!(url_base("pets", None), "");
    }

    #[test]
    fn test_url_base_strip_server() {
        assert_eq!(
            url_base("https://api.example.com/v1/pets", Some("https://api.example.com")),
            "/v1/pets"
        );
        // A prefix that does not match falls back to scheme removal
        assert_eq!(
            url_base("https://api.example.com/v1/pets", Some("https://other.com")),
            "//api.example.com/v1/pets"
        );
    }

    #[test]
    fn test_generate_document() {
        let generated = generate_document(&petstore(), Path::new("out"), &GenerateOptions::default()).unwrap();
        assert_eq!(generated.name, "pets");
        assert_eq!(generated.artifacts.len(), 3);
        assert!(generated.artifacts[0].content.starts_with("// Pet\nexport interface Pet {"));
        assert!(generated.artifacts[1].content.contains("new Service(config, '//api.example.com/v1/pets', {"));
    }

    #[test]
    fn test_walkers_on_minimal_document() {
        let document = ApiDocument::new(json!({
            "servers": [{ "url": "https://host/api/shop" }],
            "components": { "schemas": { "Item": { "type": "object", "title": "T", "properties": { "x": { "type": "string" } } } } },
            "paths": { "/items": { "get": { "operationId": "listItems" } } }
        }));

        let models = build_schemas(&document.schemas()).unwrap();
        assert_eq!(serde_json::to_value(&models).unwrap(), json!([
            { "name": "Item", "description": "T", "properties": [{ "name": "x", "required": false, "type": "String" }] }
        ]));

        let service = build_paths("shop", "//host/api/shop", &document.paths()).unwrap();
        assert_eq!(serde_json::to_value(&service.endpoints).unwrap(), json!([
            { "name": "listItems", "description": "listItems", "url": "/items", "method": "GET" }
        ]));
        assert_eq!(serde_json::to_value(&service.structure).unwrap(), json!([
            { "id": "items", "name": "items", "get": "listItems", "nodes": [] }
        ]));
    }

    #[test]
    fn test_generate_document_missing_server() {
        let document = ApiDocument::new(json!({ "paths": {} }));
        let err = generate_document(&document, Path::new("out"), &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, SwaggenError::MissingField(_)));
    }

    #[test]
    fn test_generate_batch_continues_after_failure() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let good = input.path().join("b_pets.json");
        fs::write(&good, serde_json::to_string(petstore().value()).unwrap()).unwrap();
        let bad = input.path().join("a_broken.json");
        fs::write(
            &bad,
            r#"{"servers":[{"url":"https://h/broken"}],"components":{"schemas":{"X":{"type":"string"}}}}"#,
        )
        .unwrap();

        let files = collect_documents(input.path(), &Progress::new(true)).unwrap();
        assert_eq!(files, vec![bad.clone(), good.clone()]);

        let mut sink = DryRunSink::new(Vec::new());
        let report = generate_batch(
            &files,
            output.path(),
            &GenerateOptions::default(),
            &mut sink,
            &Progress::new(true),
        )
        .unwrap();

        assert_eq!(report.services.iter().collect::<Vec<_>>(), vec!["pets"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "broken");

        let printed = String::from_utf8(sink.into_inner()).unwrap();
        assert!(printed.contains("pets.model.ts"));
        assert!(!printed.contains("broken.model.ts"));
        assert!(printed.contains("import Pets from './services/pets'"));
    }

    /// Sink failing on one path, recording what it wrote and discarded
    #[derive(Default)]
    struct FlakySink {
        fail_on: String,
        written: Vec<PathBuf>,
        discarded: Vec<PathBuf>,
    }

    impl ArtifactSink for FlakySink {
        fn write(&mut self, artifact: &Artifact) -> Result<()> {
            if artifact.path.ends_with(&self.fail_on) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
            }
            self.written.push(artifact.path.clone());
            Ok(())
        }

        fn discard(&mut self, artifact: &Artifact) -> Result<()> {
            self.discarded.push(artifact.path.clone());
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_discards_partial_service() {
        let input = TempDir::new().unwrap();
        let file = input.path().join("pets.json");
        fs::write(&file, serde_json::to_string(petstore().value()).unwrap()).unwrap();

        let mut sink = FlakySink {
            fail_on: "pets.service.ts".to_string(),
            ..FlakySink::default()
        };
        let report = generate_batch(
            &[file],
            Path::new("out"),
            &GenerateOptions::default(),
            &mut sink,
            &Progress::new(true),
        )
        .unwrap();

        assert!(report.services.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "pets");
        assert_eq!(sink.discarded, vec![Path::new("out/services/pets/pets.model.ts").to_path_buf()]);
        // Only the model file and the global index made it through
        assert_eq!(sink.written.len(), 2);
        assert!(sink.written[1].ends_with("index.ts"));
    }

    #[test]
    fn test_write_failure_drops_earlier_service_with_same_name() {
        let input = TempDir::new().unwrap();
        let first = input.path().join("a.json");
        let second = input.path().join("b.json");
        fs::write(&first, serde_json::to_string(petstore().value()).unwrap()).unwrap();
        fs::write(&second, serde_json::to_string(petstore().value()).unwrap()).unwrap();

        // The sixth write is the index file of the second document
        struct SecondFails {
            writes: usize,
        }
        impl ArtifactSink for SecondFails {
            fn write(&mut self, _artifact: &Artifact) -> Result<()> {
                self.writes += 1;
                if self.writes == 6 {
                    return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
                }
                Ok(())
            }
        }

        let report = generate_batch(
            &[first, second],
            Path::new("out"),
            &GenerateOptions::default(),
            &mut SecondFails { writes: 0 },
            &Progress::new(true),
        )
        .unwrap();

        assert!(report.services.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_collect_documents_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            collect_documents(&missing, &Progress::new(true)),
            Err(SwaggenError::Argument(_))
        ));
    }

    #[test]
    fn test_config_argument() {
        let args = vec!["swaggen".to_string(), "--config".to_string(), "a.toml".to_string()];
        assert_eq!(config_argument(&args), Some(PathBuf::from("a.toml")));
        let args = vec!["swaggen".to_string(), "--config=b.toml".to_string()];
        assert_eq!(config_argument(&args), Some(PathBuf::from("b.toml")));
    }

    #[test]
    fn test_merge_default_options() {
        let config = Config {
            default_options: vec!["--quiet".to_string()],
            ..Config::default()
        };
        let merged = merge_default_options(vec!["swaggen".to_string(), "--files".to_string()], &config);
        assert_eq!(merged, vec!["swaggen", "--quiet", "--files"]);
    }
}
