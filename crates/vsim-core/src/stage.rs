//! Stage Trait: one contract for every step of the simulation pipeline
use crate::context::ExecutionContext;
use crate::data_model::{PipelineState, StageOutcome};
use crate::error::StageError;
use crate::launcher::Launcher;
use std::io::Write;

pub trait Stage: Send + Sync {
    /// Unique stage id (e.g. "build.iverilog.v1")
    fn id(&self) -> &'static str;

    /// State the pipeline is in once this stage succeeds
    fn reaches(&self) -> PipelineState;

    /// Runs the stage. User-facing diagnostics go to `out`.
    ///
    /// An `Err` halts the pipeline; the stage has already printed whatever
    /// the user needs to see about it.
    fn run(
        &self,
        ctx: &ExecutionContext,
        launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> Result<StageOutcome, StageError>;
}
