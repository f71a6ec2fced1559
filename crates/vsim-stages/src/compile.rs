use std::io::{self, Write};
use vsim_core::{ExecutionContext, Launcher, PipelineState, Stage, StageError, StageOutcome};

/// Compiles design and testbench into the simulation executable.
#[derive(Default)]
pub struct BuildStage;

impl BuildStage {
    /// `-Wall -o <binary> <design> <testbench>`
    pub fn args(ctx: &ExecutionContext) -> Vec<String> {
        let cfg = &ctx.config;
        vec![
            "-Wall".to_string(),
            "-o".to_string(),
            cfg.outputs.binary.clone(),
            cfg.sources.design.to_string_lossy().into_owned(),
            cfg.sources.testbench.to_string_lossy().into_owned(),
        ]
    }
}

impl Stage for BuildStage {
    fn id(&self) -> &'static str {
        "build.compile.v1"
    }

    fn reaches(&self) -> PipelineState {
        PipelineState::Built
    }

    fn run(
        &self,
        ctx: &ExecutionContext,
        launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> Result<StageOutcome, StageError> {
        let compiler = &ctx.config.tools.compiler;
        writeln!(out, "=== Compilation ===")?;

        let result = match launcher.run(compiler, &Self::args(ctx), &ctx.working_dir) {
            Ok(result) => result,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                writeln!(out, "ERROR: {} was not found in PATH", compiler)?;
                writeln!(out, "Check that the Verilog toolchain is installed")?;
                return Err(StageError::ToolNotFound {
                    tool: compiler.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !result.success() {
            writeln!(out, "Compilation ERROR:")?;
            writeln!(out, "{}", result.stderr)?;
            writeln!(out, "Stdout: {}", result.stdout)?;
            return Err(StageError::ToolFailed {
                tool: compiler.clone(),
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }

        writeln!(out, "Compilation OK")?;
        Ok(StageOutcome::ok().with_exit_code(result.exit_code))
    }
}
