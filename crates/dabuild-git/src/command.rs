//! External command invocation.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::{GitError, GitResult};

/// Captured result of one external command.
#[derive(Debug)]
pub(crate) struct CommandOutput {
    /// Exit code (`None` if killed by a signal).
    pub exit_code: Option<i32>,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Standard output decoded and trimmed.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    fn combined(&self) -> String {
        let stdout = String::from_utf8_lossy(&self.stdout);
        let mut combined = self.stderr.trim().to_string();
        if !stdout.trim().is_empty() {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(stdout.trim());
        }
        combined
    }
}

/// One program invocation rooted at a working directory.
#[derive(Debug)]
pub(crate) struct Invocation<'a> {
    cwd: &'a Path,
    program: &'a str,
    args: Vec<OsString>,
}

impl<'a> Invocation<'a> {
    pub fn new(cwd: &'a Path, program: &'a str) -> Self {
        Self {
            cwd,
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Runs the command and returns its output whatever the exit status.
    pub fn output(&self) -> GitResult<CommandOutput> {
        debug!(program = self.program, args = ?self.args, cwd = ?self.cwd, "running command");

        let output = Command::new(self.program)
            .args(&self.args)
            .current_dir(self.cwd)
            .output()
            .map_err(|source| GitError::Spawn {
                program: self.program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Runs the command, failing on any non-zero exit status.
    pub fn run(&self) -> GitResult<CommandOutput> {
        let output = self.output()?;
        if output.success() {
            Ok(output)
        } else {
            Err(self.failure(&output))
        }
    }

    /// Runs the command and returns its trimmed standard output.
    pub fn read(&self) -> GitResult<String> {
        self.run().map(|output| output.text())
    }

    /// Builds the error for a failed run of this command.
    pub fn failure(&self, output: &CommandOutput) -> GitError {
        let err = GitError::CommandFailed {
            program: self.program.to_string(),
            args: self.display_args(),
            code: output.exit_code,
            output: output.combined(),
        };
        warn!("{err}");
        err
    }

    /// Command line for diagnostics.
    pub fn describe(&self) -> String {
        let mut line = self.program.to_string();
        for arg in self.display_args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}
