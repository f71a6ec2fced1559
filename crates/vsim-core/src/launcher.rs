//! Process launching: the seam between the pipeline and the operating system
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of a blocking tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Starts external programs on behalf of the stages.
///
/// `io::ErrorKind::NotFound` from either method means the program could not
/// be located on the search path.
pub trait Launcher: Send + Sync {
    /// Runs `program` to completion in `cwd`, capturing both streams.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<ProcessOutput>;

    /// Starts `program` in `cwd` and returns immediately. The child is never
    /// waited on.
    fn spawn_detached(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<()>;
}

/// Launcher backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<()> {
        let child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .spawn()?;
        tracing::debug!(program, pid = child.id(), "detached process started");
        // Dropping the handle neither kills nor reaps the child.
        drop(child);
        Ok(())
    }
}
