//! Pipeline Runner: chains stages, halts on the first failure, records timings
use crate::context::ExecutionContext;
use crate::data_model::{PipelineState, RunReport, StageRecord, StageStatus};
use crate::launcher::Launcher;
use crate::stage::Stage;
use chrono::Utc;
use std::io::Write;
use std::time::Instant;

pub struct PipelineRunner {
    stages: Vec<Box<dyn Stage>>,
    pipeline_id: String,
}

impl PipelineRunner {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self { stages, pipeline_id }
    }

    pub fn run(
        &self,
        ctx: &ExecutionContext,
        launcher: &dyn Launcher,
        out: &mut dyn Write,
    ) -> RunReport {
        let started_at = Utc::now();
        let mut state = PipelineState::Idle;
        let mut records = Vec::with_capacity(self.stages.len());
        let mut trace_digest = None;
        let mut success = true;

        tracing::info!(run_id = %ctx.run_id, pipeline = %self.pipeline_id, "pipeline started");

        for stage in &self.stages {
            let start = Instant::now();
            let result = stage.run(ctx, launcher, out);
            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(outcome) => {
                    let status = outcome.status();
                    if let Some(warning) = &outcome.warning {
                        tracing::info!(
                            stage = stage.id(),
                            %warning,
                            "stage finished with a warning"
                        );
                    } else {
                        tracing::debug!(stage = stage.id(), latency_ms, "stage finished");
                    }
                    if outcome.trace_digest.is_some() {
                        trace_digest = outcome.trace_digest.clone();
                    }
                    records.push(StageRecord {
                        id: stage.id().to_string(),
                        status,
                        latency_ms,
                        exit_code: outcome.exit_code,
                        message: outcome.warning,
                    });
                    state = stage.reaches();
                }
                Err(err) => {
                    tracing::info!(
                        stage = stage.id(),
                        kind = err.kind(),
                        error = %err,
                        "stage failed"
                    );
                    let exit_code = match &err {
                        crate::error::StageError::ToolFailed { exit_code, .. } => *exit_code,
                        _ => None,
                    };
                    records.push(StageRecord {
                        id: stage.id().to_string(),
                        status: StageStatus::Failed,
                        latency_ms,
                        exit_code,
                        message: Some(err.to_string()),
                    });
                    success = false;
                    break;
                }
            }
        }

        tracing::info!(run_id = %ctx.run_id, ?state, success, "pipeline finished");

        RunReport {
            run_id: ctx.run_id.clone(),
            pipeline_id: self.pipeline_id.clone(),
            started_at,
            stages: records,
            final_state: state,
            success,
            trace_digest,
        }
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::data_model::StageOutcome;
    use crate::error::StageError;
    use crate::launcher::ProcessOutput;
    use std::io;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NoLauncher;

    impl Launcher for NoLauncher {
        fn run(&self, _: &str, _: &[String], _: &Path) -> io::Result<ProcessOutput> {
            panic!("no process expected")
        }

        fn spawn_detached(&self, _: &str, _: &[String], _: &Path) -> io::Result<()> {
            panic!("no process expected")
        }
    }

    enum Behaviour {
        Pass,
        Warn,
        Fail,
    }

    struct Scripted {
        id: &'static str,
        reaches: PipelineState,
        behaviour: Behaviour,
        calls: Arc<AtomicUsize>,
    }

    impl Stage for Scripted {
        fn id(&self) -> &'static str {
            self.id
        }

        fn reaches(&self) -> PipelineState {
            self.reaches
        }

        fn run(
            &self,
            _ctx: &ExecutionContext,
            _launcher: &dyn Launcher,
            out: &mut dyn Write,
        ) -> Result<StageOutcome, StageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            writeln!(out, "{}", self.id)?;
            match self.behaviour {
                Behaviour::Pass => Ok(StageOutcome::ok().with_exit_code(Some(0))),
                Behaviour::Warn => Ok(StageOutcome::warn("careful")),
                Behaviour::Fail => Err(StageError::ToolNotFound {
                    tool: "iverilog".to_string(),
                }),
            }
        }
    }

    fn stage(
        id: &'static str,
        reaches: PipelineState,
        behaviour: Behaviour,
        calls: &Arc<AtomicUsize>,
    ) -> Box<dyn Stage> {
        Box::new(Scripted {
            id,
            reaches,
            behaviour,
            calls: Arc::clone(calls),
        })
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(std::env::temp_dir(), SimConfig::default())
    }

    #[test]
    fn pipeline_id_joins_stage_prefixes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = PipelineRunner::new(vec![
            stage("preflight.files.v1", PipelineState::Checked, Behaviour::Pass, &calls),
            stage("build.iverilog.v1", PipelineState::Built, Behaviour::Pass, &calls),
        ]);
        assert_eq!(runner.pipeline_id(), "preflight→build");
        assert_eq!(runner.len(), 2);
    }

    #[test]
    fn warnings_do_not_fail_the_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = PipelineRunner::new(vec![
            stage("a.v1", PipelineState::Checked, Behaviour::Pass, &calls),
            stage("b.v1", PipelineState::Done, Behaviour::Warn, &calls),
        ]);
        let mut out = Vec::new();
        let report = runner.run(&ctx(), &NoLauncher, &mut out);

        assert!(report.success);
        assert_eq!(report.final_state, PipelineState::Done);
        assert_eq!(report.stages[1].status, StageStatus::Warn);
        assert_eq!(report.stages[1].message.as_deref(), Some("careful"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failure_halts_and_keeps_last_state() {
        let calls = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let runner = PipelineRunner::new(vec![
            stage("a.v1", PipelineState::Checked, Behaviour::Pass, &calls),
            stage("b.v1", PipelineState::Built, Behaviour::Fail, &calls),
            stage("c.v1", PipelineState::Simulated, Behaviour::Pass, &after),
        ]);
        let mut out = Vec::new();
        let report = runner.run(&ctx(), &NoLauncher, &mut out);

        assert!(!report.success);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.final_state, PipelineState::Checked);
        assert_eq!(report.stages.len(), 2);
        assert_eq!(report.stages[1].status, StageStatus::Failed);
        assert_eq!(after.load(Ordering::SeqCst), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "a.v1\nb.v1\n");
    }
}
