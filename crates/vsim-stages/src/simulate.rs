use std::io::{self, Write};
use vsim_core::{ExecutionContext, Launcher, PipelineState, Stage, StageError, StageOutcome};

/// Runs the compiled simulation through the simulator launcher.
///
/// The launcher's exit status is recorded but not judged: a testbench that
/// calls `$finish` with a non-zero code still counts as simulated.
#[derive(Default)]
pub struct SimulateStage;

impl Stage for SimulateStage {
    fn id(&self) -> &'static str {
        "run.simulate.v1"
    }

    fn reaches(&self) -> PipelineState {
        PipelineState::Simulated
    }

    fn run(
        &self,
        ctx: &ExecutionContext,
        launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> Result<StageOutcome, StageError> {
        let simulator = &ctx.config.tools.simulator;
        writeln!(out, "=== Simulation ===")?;

        let args = [ctx.config.outputs.binary.clone()];
        let result = match launcher.run(simulator, &args, &ctx.working_dir) {
            Ok(result) => result,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                writeln!(out, "ERROR: {} was not found", simulator)?;
                return Err(StageError::ToolNotFound {
                    tool: simulator.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        writeln!(out, "Simulation output:")?;
        writeln!(out, "{}", result.stdout)?;
        if !result.stderr.is_empty() {
            writeln!(out, "Error messages:")?;
            writeln!(out, "{}", result.stderr)?;
        }

        tracing::debug!(exit_code = ?result.exit_code, "simulator returned");
        Ok(StageOutcome::ok().with_exit_code(result.exit_code))
    }
}
