use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use vsim_core::{ExecutionContext, Launcher, PipelineState, Stage, StageError, StageOutcome};

/// `blake3:<hex>` of the file at `path`.
pub fn trace_digest(path: &Path) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut File::open(path)?, &mut hasher)?;
    Ok(format!("blake3:{}", hasher.finalize()))
}

/// Looks for the waveform dump and hands it to the viewer.
///
/// Never fails the run. A missing trace or viewer only produces a warning.
#[derive(Default)]
pub struct ArtifactStage;

impl Stage for ArtifactStage {
    fn id(&self) -> &'static str {
        "artifact.trace.v1"
    }

    fn reaches(&self) -> PipelineState {
        PipelineState::Done
    }

    fn run(
        &self,
        ctx: &ExecutionContext,
        launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> Result<StageOutcome, StageError> {
        let trace = &ctx.config.outputs.trace;
        let trace_path = ctx.resolve(trace);

        if !trace_path.exists() {
            writeln!(out, "WARNING: {} was not created", trace.display())?;
            return Ok(StageOutcome::warn(format!("{} was not created", trace.display())));
        }

        writeln!(out, "VCD file created successfully")?;
        let mut outcome = StageOutcome::ok();
        match trace_digest(&trace_path) {
            Ok(digest) => {
                tracing::info!(trace = %trace_path.display(), %digest, "trace file found");
                outcome = outcome.with_trace_digest(digest);
            }
            Err(e) => tracing::warn!(
                trace = %trace_path.display(),
                error = %e,
                "could not hash trace file"
            ),
        }

        if !ctx.config.launch_viewer {
            writeln!(out, "Viewer launch disabled, trace is at {}", trace.display())?;
            return Ok(outcome);
        }

        let viewer = &ctx.config.tools.viewer;
        writeln!(out, "Opening {}...", viewer)?;
        let args = [trace.to_string_lossy().into_owned()];
        match launcher.spawn_detached(viewer, &args, &ctx.working_dir) {
            Ok(()) => {
                writeln!(out, "{} launched", viewer)?;
                Ok(outcome)
            }
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    writeln!(out, "{} not found - open {} manually", viewer, trace.display())?;
                } else {
                    writeln!(
                        out,
                        "Could not launch {} ({}) - open {} manually",
                        viewer,
                        e,
                        trace.display()
                    )?;
                }
                let mut warned =
                    StageOutcome::warn(format!("{} could not be launched: {}", viewer, e));
                warned.trace_digest = outcome.trace_digest;
                Ok(warned)
            }
        }
    }
}
