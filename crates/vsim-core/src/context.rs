//! Execution Context: what every stage sees during a run
use crate::config::SimConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub run_id: String,
    /// Directory tools run in; relative config paths resolve against it
    pub working_dir: PathBuf,
    pub config: SimConfig,
}

impl ExecutionContext {
    pub fn new(working_dir: impl Into<PathBuf>, config: SimConfig) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            working_dir: working_dir.into(),
            config,
        }
    }

    /// Context rooted at the process's current directory.
    pub fn from_current_dir(config: SimConfig) -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?, config))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.working_dir.join(path)
    }
}
