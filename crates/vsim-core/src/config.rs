//! Toolchain configuration
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields the stock Icarus Verilog setup:
//!
//! ```yaml
//! tools:
//!   compiler: iverilog
//!   simulator: vvp
//!   viewer: gtkwave
//! sources:
//!   design: src/pixel_counters.v
//!   testbench: testbench/tb_pixel_counters_vscode.v
//! outputs:
//!   binary: simulation
//!   trace: waves.vcd
//! launch_viewer: true
//! report: null
//! ```

use crate::error::VsimError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a YAML config file
pub const CONFIG_ENV: &str = "VSIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tools: Tools,
    pub sources: Sources,
    pub outputs: Outputs,
    /// Spawn the waveform viewer when a trace was produced
    pub launch_viewer: bool,
    /// Where to write the JSON run report, if anywhere
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tools {
    pub compiler: String,
    pub simulator: String,
    pub viewer: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            compiler: "iverilog".to_string(),
            simulator: "vvp".to_string(),
            viewer: "gtkwave".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub design: PathBuf,
    pub testbench: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            design: PathBuf::from("src/pixel_counters.v"),
            testbench: PathBuf::from("testbench/tb_pixel_counters_vscode.v"),
        }
    }
}

impl Sources {
    /// Required inputs, in the order they are checked and reported.
    pub fn required(&self) -> Vec<PathBuf> {
        vec![self.design.clone(), self.testbench.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outputs {
    pub binary: String,
    pub trace: PathBuf,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            binary: "simulation".to_string(),
            trace: PathBuf::from("waves.vcd"),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tools: Tools::default(),
            sources: Sources::default(),
            outputs: Outputs::default(),
            launch_viewer: true,
            report: None,
        }
    }
}

impl SimConfig {
    /// Parses a YAML config file.
    pub fn load(path: &Path) -> Result<Self, VsimError> {
        let text = std::fs::read_to_string(path).map_err(|source| VsimError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| VsimError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Loads the file named by `VSIM_CONFIG`, or falls back to defaults.
    pub fn from_env() -> Result<Self, VsimError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::info!(path = ?path, "loading configuration");
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }
}
