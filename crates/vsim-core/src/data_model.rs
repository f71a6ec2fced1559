//! Data Model: pipeline states, stage records and the run report
use crate::error::VsimError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Progress of a run. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Checked,
    Built,
    Simulated,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Ok,
    Warn,
    Failed,
}

/// What a stage hands back when it did not stop the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcome {
    pub warning: Option<String>,
    pub exit_code: Option<i32>,
    pub trace_digest: Option<String>,
}

impl StageOutcome {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            warning: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_trace_digest(mut self, digest: String) -> Self {
        self.trace_digest = Some(digest);
        self
    }

    pub fn status(&self) -> StageStatus {
        if self.warning.is_some() {
            StageStatus::Warn
        } else {
            StageStatus::Ok
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    pub id: String,
    pub status: StageStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub pipeline_id: String,
    pub started_at: DateTime<Utc>,
    pub stages: Vec<StageRecord>,
    pub final_state: PipelineState,
    pub success: bool,
    /// `blake3:<hex>` of the trace file, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_digest: Option<String>,
}

impl RunReport {
    /// Process exit code for this run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success {
            0
        } else {
            1
        }
    }

    pub fn stage(&self, id: &str) -> Option<&StageRecord> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn to_json(&self) -> Result<String, VsimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), VsimError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(success: bool) -> RunReport {
        let (status, exit_code, final_state) = if success {
            (StageStatus::Ok, 0, PipelineState::Done)
        } else {
            (StageStatus::Failed, 2, PipelineState::Checked)
        };
        RunReport {
            run_id: "run-1".to_string(),
            pipeline_id: "preflight→build".to_string(),
            started_at: Utc::now(),
            stages: vec![StageRecord {
                id: "build.iverilog.v1".to_string(),
                status,
                latency_ms: 12,
                exit_code: Some(exit_code),
                message: None,
            }],
            final_state,
            success,
            trace_digest: None,
        }
    }

    #[test]
    fn states_are_ordered() {
        assert!(PipelineState::Idle < PipelineState::Checked);
        assert!(PipelineState::Built < PipelineState::Simulated);
        assert!(PipelineState::Simulated < PipelineState::Done);
    }

    #[test]
    fn exit_code_follows_success() {
        assert_eq!(report(true).exit_code(), 0);
        assert_eq!(report(false).exit_code(), 1);
    }

    #[test]
    fn warning_outcome_has_warn_status() {
        assert_eq!(StageOutcome::ok().status(), StageStatus::Ok);
        assert_eq!(StageOutcome::warn("no trace").status(), StageStatus::Warn);
    }

    #[test]
    fn report_serializes_snake_case() {
        let json = report(false).to_json().unwrap();
        assert!(json.contains("\"final_state\": \"checked\""));
        assert!(json.contains("\"status\": \"failed\""));
        assert!(!json.contains("trace_digest"));
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/run.json");
        report(true).write_json(&path).unwrap();

        let back: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(back.success);
        assert_eq!(back.stage("build.iverilog.v1").unwrap().exit_code, Some(0));
    }
}
