//! vsim stages: the four steps of a Verilog simulation run.
//!
//! # Pipeline Flow
//!
//! ```text
//! Preflight → Compile → Simulate → Artifact
//!     ↓          ↓          ↓          ↓
//!  Checked     Built    Simulated    Done
//! ```
//!
//! Preflight, compile and simulate stop the run on failure. The artifact
//! stage only ever warns.

mod artifact;
mod compile;
mod preflight;
mod simulate;

#[cfg(test)]
mod fake;

pub use artifact::{trace_digest, ArtifactStage};
pub use compile::BuildStage;
pub use preflight::{missing_files, PreflightStage};
pub use simulate::SimulateStage;

use vsim_core::{PipelineRunner, Stage};

/// Stages in execution order.
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(PreflightStage),
        Box::new(BuildStage),
        Box::new(SimulateStage),
        Box::new(ArtifactStage),
    ]
}

/// The full `preflight → build → run → artifact` pipeline.
pub fn simulation_pipeline() -> PipelineRunner {
    PipelineRunner::new(default_stages())
}
