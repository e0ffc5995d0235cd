//! Locating and running the `mdbtools` programs.

use super::super::error::{DatabaseError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::trace;

/// Where the `mdb-*` executables are found
#[derive(Debug, Clone, Default)]
pub struct MdbTools {
    /// Directory holding the executables; `PATH` lookup when `None`
    dir: Option<PathBuf>,
}

impl MdbTools {
    pub fn new(dir: Option<&Path>) -> Self {
        Self {
            dir: dir.map(Path::to_path_buf),
        }
    }

    fn program(&self, name: &str) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    fn command<I, S>(&self, name: &str, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(self.program(name));
        command.args(args);
        command
    }

    /// Run `name` to completion and return its standard output.
    pub fn run<I, S>(&self, name: &str, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command(name, args);
        trace!(?command, "running");
        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DatabaseError::Command {
                program: name.to_string(),
                reason: format!("failed to execute: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DatabaseError::Command {
                program: name.to_string(),
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start `name` with its standard output piped back.
    pub fn spawn<I, S>(&self, name: &str, args: I) -> Result<Child>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command(name, args);
        trace!(?command, "spawning");
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DatabaseError::Command {
                program: name.to_string(),
                reason: format!("failed to execute: {}", e),
            })
    }
}
