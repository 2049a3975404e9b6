//! Common test utilities for swaggen integration tests
//!
//! This module provides shared test infrastructure including:
//! - CLI invocation helpers
//! - Temporary input/output workspaces
//! - Test fixture management

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

/// Input and output directories for one run, isolated from the user config
pub struct Workspace {
    pub input: TempDir,
    pub output: TempDir,
    pub config_dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            input: TempDir::new().expect("Failed to create input dir"),
            output: TempDir::new().expect("Failed to create output dir"),
            config_dir: TempDir::new().expect("Failed to create config dir"),
        }
    }

    /// Copy a fixture into the input directory, returning its new path
    pub fn add_fixture(&self, name: &str) -> PathBuf {
        let target = self.input.path().join(name);
        std::fs::copy(fixtures::fixture_path(name), &target).expect("Failed to copy fixture");
        target
    }

    /// Write a file into the input directory
    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let target = self.input.path().join(name);
        std::fs::write(&target, content).expect("Failed to write input file");
        target
    }

    pub fn output_path(&self) -> &Path {
        self.output.path()
    }

    /// Read a generated file relative to the output directory
    pub fn read_output(&self, relative: &str) -> String {
        std::fs::read_to_string(self.output.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn output_exists(&self, relative: &str) -> bool {
        self.output.path().join(relative).exists()
    }

    /// Run the CLI with `--output` set to this workspace
    pub fn run(&self, files: &Path, extra: &[&str]) -> CliResponse {
        let mut args = vec![
            "--files".to_string(),
            files.display().to_string(),
            "--output".to_string(),
            self.output.path().display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        swaggen_with_config_dir(&args, self.config_dir.path())
    }
}

/// Run the CLI with the given arguments (excluding the program name)
pub fn swaggen(args: &[&str]) -> CliResponse {
    let config_dir = TempDir::new().expect("Failed to create temp config dir");
    swaggen_with_config_dir(args, config_dir.path())
}

/// Run the CLI with a specific config directory
pub fn swaggen_with_config_dir(args: &[&str], config_dir: &Path) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swaggen"));
    cmd.args(args);

    cmd.env("SWAGGEN_CONFIG_DIR", config_dir);
    cmd.env_remove("SWAGGEN_CONFIG");
    cmd.env_remove("RUST_LOG");

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().expect("Failed to execute command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// Test fixture paths
pub mod fixtures {
    use once_cell::sync::Lazy;
    use std::path::PathBuf;

    pub static FIXTURES_DIR: Lazy<PathBuf> = Lazy::new(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
    });

    /// Get path to a fixture file
    pub fn fixture_path(name: &str) -> PathBuf {
        FIXTURES_DIR.join(name)
    }

    /// Expected generator output
    pub fn expected(name: &str) -> String {
        std::fs::read_to_string(FIXTURES_DIR.join("expected").join(name))
            .unwrap_or_else(|e| panic!("Failed to read expected {}: {}", name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_from_i32() {
        assert_eq!(ExitStatus::from(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from(1), ExitStatus::Error);
        assert_eq!(ExitStatus::from(2), ExitStatus::Error);
    }
}
