use std::io::Write;
use std::path::{Path, PathBuf};
use vsim_core::{ExecutionContext, Launcher, PipelineState, Stage, StageError, StageOutcome};

/// Returns the entries of `required` that do not exist under `root`, in order.
pub fn missing_files(root: &Path, required: &[PathBuf]) -> Vec<PathBuf> {
    required
        .iter()
        .filter(|p| !root.join(p).exists())
        .cloned()
        .collect()
}

/// Refuses to start the toolchain unless the design and testbench exist.
#[derive(Default)]
pub struct PreflightStage;

impl Stage for PreflightStage {
    fn id(&self) -> &'static str {
        "preflight.files.v1"
    }

    fn reaches(&self) -> PipelineState {
        PipelineState::Checked
    }

    fn run(
        &self,
        ctx: &ExecutionContext,
        _launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> Result<StageOutcome, StageError> {
        let required = ctx.config.sources.required();
        let missing = missing_files(&ctx.working_dir, &required);
        if missing.is_empty() {
            return Ok(StageOutcome::ok());
        }

        writeln!(out, "ERROR: missing files:")?;
        for path in &missing {
            writeln!(out, "  - {}", path.display())?;
        }
        writeln!(out, "Check the project layout")?;

        Err(StageError::MissingInputs { missing })
    }
}
