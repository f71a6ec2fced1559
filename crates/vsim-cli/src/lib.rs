//! Runs the whole simulation pipeline and maps its outcome to an exit code.
use std::io::Write;
use tracing_subscriber::EnvFilter;
use vsim_core::{ExecutionContext, Launcher, SimConfig, VsimError};

/// Installs the fmt subscriber on stdout. `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .try_init();
}

/// Runs the pipeline in the current directory. Returns the process exit code.
pub fn run(
    config: SimConfig,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<u8, VsimError> {
    let ctx = ExecutionContext::from_current_dir(config)?;
    run_in(&ctx, launcher, out)
}

pub fn run_in(
    ctx: &ExecutionContext,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<u8, VsimError> {
    writeln!(out, "=== Verilog Simulation Runner ===")?;
    tracing::info!(version = vsim_core::VSIM_VERSION, run_id = %ctx.run_id, "starting run");

    let report = vsim_stages::simulation_pipeline().run(ctx, launcher, out);

    if report.final_state > vsim_core::PipelineState::Idle {
        if report.success {
            writeln!(out, "=== Simulation finished successfully ===")?;
        } else {
            writeln!(out, "=== Errors during simulation ===")?;
        }
    }

    if let Some(path) = &ctx.config.report {
        let path = ctx.resolve(path);
        match report.write_json(&path) {
            Ok(()) => tracing::info!(report = %path.display(), "run report written"),
            Err(e) => tracing::warn!(
                report = %path.display(),
                error = %e,
                "could not write run report"
            ),
        }
    }

    Ok(report.exit_code())
}
