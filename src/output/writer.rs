//! Artifact writing
//!
//! Rendering never touches the filesystem; rendered [`Artifact`]s are handed
//! to an [`ArtifactSink`] which either writes them or prints them.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::Result;

/// A rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Destination for rendered artifacts
pub trait ArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()>;

    /// Undo a previous [`write`](ArtifactSink::write) of `artifact`
    fn discard(&mut self, _artifact: &Artifact) -> Result<()> {
        Ok(())
    }
}

/// Writes artifacts to disk, creating parent directories as needed
#[derive(Debug, Default)]
pub struct FileSink;

impl ArtifactSink for FileSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&artifact.path, &artifact.content)?;
        info!(path = %artifact.path.display(), bytes = artifact.content.len(), "Wrote artifact");
        Ok(())
    }

    fn discard(&mut self, artifact: &Artifact) -> Result<()> {
        match fs::remove_file(&artifact.path) {
            Ok(()) => {
                info!(path = %artifact.path.display(), "Removed artifact");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Prints artifacts instead of writing them
pub struct DryRunSink<W: Write> {
    out: W,
}

impl<W: Write> DryRunSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ArtifactSink for DryRunSink<W> {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        writeln!(self.out, "==> {} <==", artifact.path.display())?;
        writeln!(self.out, "{}", artifact.content)?;
        Ok(())
    }
}

/// Output paths for one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLayout {
    pub model: PathBuf,
    pub service: PathBuf,
    pub index: PathBuf,
}

impl ServiceLayout {
    /// `<output>/services/<name>/{<name>.model.ts, <name>.service.ts, index.ts}`
    pub fn new(output_dir: &Path, name: &str) -> Self {
        let dir = output_dir.join("services").join(name);
        Self {
            model: dir.join(format!("{}.model.ts", name)),
            service: dir.join(format!("{}.service.ts", name)),
            index: dir.join("index.ts"),
        }
    }
}

/// `<output>/index.ts`
pub fn global_index_path(output_dir: &Path) -> PathBuf {
    output_dir.join("index.ts")
}
