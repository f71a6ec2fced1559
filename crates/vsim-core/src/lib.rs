//! vsim core: Stage trait, Runner, process launching and data model
//!
//! A run is a fixed chain of stages executed in order; the first stage that
//! returns an error stops the chain.

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod launcher;
pub mod runner;
pub mod stage;

pub use config::{SimConfig, CONFIG_ENV};
pub use context::ExecutionContext;
pub use data_model::{PipelineState, RunReport, StageOutcome, StageRecord, StageStatus};
pub use error::{StageError, VsimError};
pub use launcher::{Launcher, ProcessOutput, SystemLauncher};
pub use runner::PipelineRunner;
pub use stage::Stage;

/// Engine version
pub const VSIM_VERSION: &str = env!("CARGO_PKG_VERSION");
