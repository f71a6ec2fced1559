//! Binary entrypoint for the simulation runner.
use std::process::ExitCode;
use vsim_core::{SimConfig, SystemLauncher};

fn main() -> ExitCode {
    vsim_cli::init_tracing();

    // Config file location can be supplied with VSIM_CONFIG
    let config = match SimConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match vsim_cli::run(config, &SystemLauncher, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            println!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
