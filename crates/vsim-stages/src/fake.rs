//! Recording launcher for stage tests
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use vsim_core::{Launcher, ProcessOutput};

#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub detached: bool,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Output(ProcessOutput),
    Error(io::ErrorKind),
}

impl Reply {
    pub fn exit(code: i32) -> Self {
        Reply::Output(ProcessOutput {
            exit_code: Some(code),
            ..Default::default()
        })
    }
}

/// Programs without a reply behave as if they were not installed.
#[derive(Default)]
pub struct FakeLauncher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

impl FakeLauncher {
    pub fn on(mut self, program: &str, reply: Reply) -> Self {
        self.replies.insert(program.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn invoke(&self, program: &str, args: &[String], detached: bool) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.to_vec(),
            detached,
        });
        match self.replies.get(program) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Error(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

impl Launcher for FakeLauncher {
    fn run(&self, program: &str, args: &[String], _cwd: &Path) -> io::Result<ProcessOutput> {
        self.invoke(program, args, false)
    }

    fn spawn_detached(&self, program: &str, args: &[String], _cwd: &Path) -> io::Result<()> {
        self.invoke(program, args, true).map(|_| ())
    }
}
