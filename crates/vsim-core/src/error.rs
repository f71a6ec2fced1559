//! Unified Error Model
use std::path::PathBuf;
use thiserror::Error;

/// Why a stage stopped the pipeline.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("PREFLIGHT/MISSING: {}", display_paths(.missing))]
    MissingInputs { missing: Vec<PathBuf> },

    #[error("TOOL/NOT_FOUND: {tool}")]
    ToolNotFound { tool: String },

    #[error("TOOL/FAILED: {tool} exited with {}", display_code(.exit_code))]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),
}

impl StageError {
    /// Short tag used in stage records and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInputs { .. } => "missing_inputs",
            Self::ToolNotFound { .. } => "tool_not_found",
            Self::ToolFailed { .. } => "tool_failed",
            Self::Io(_) => "io",
        }
    }
}

#[derive(Error, Debug)]
pub enum VsimError {
    #[error("CONFIG/{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("CONFIG/{}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("REPORT/{0}")]
    Report(#[from] serde_json::Error),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
