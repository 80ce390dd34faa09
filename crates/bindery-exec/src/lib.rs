//! Subprocess invocation for the external documentation tools.
//!
//! Every tool the pipeline shells out to goes through [`ToolInvocation`], so
//! output streams are always drained and exit status is always observed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Platform-specific executable name (`doxygen` becomes `doxygen.exe` on
/// Windows).
pub fn executable(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// A single external tool invocation.
///
/// The terminal methods consume the invocation, so a process handle is never
/// reused after it has been waited on.
#[derive(Debug)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<OsString>,
    stdin: Option<Vec<u8>>,
}

impl ToolInvocation {
    /// Create an invocation for `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `bytes` to the tool's standard input once launched.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// The program this invocation launches.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run with inherited stdio and fail on a non-zero exit.
    pub async fn status(self) -> Result<(), ExecError> {
        let program = self.program.display().to_string();

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .map_err(|source| ExecError::Launch {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ExecError::Exit { program, status });
        }
        Ok(())
    }

    /// Run with piped stdio and return the exit status together with the
    /// combined stdout/stderr text.
    ///
    /// The status is returned rather than checked, so callers can surface the
    /// captured diagnostics before deciding what a failure means.
    pub async fn capture(self) -> Result<Captured, ExecError> {
        let program = self.program.display().to_string();

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command.spawn().map_err(|source| ExecError::Launch {
            program: program.clone(),
            source,
        })?;

        if let Some(bytes) = self.stdin {
            if let Some(mut handle) = child.stdin.take() {
                handle
                    .write_all(&bytes)
                    .await
                    .map_err(|source| ExecError::Io {
                        program: program.clone(),
                        source,
                    })?;
                handle.shutdown().await.map_err(|source| ExecError::Io {
                    program: program.clone(),
                    source,
                })?;
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| ExecError::Io {
                program: program.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(Captured {
            status: output.status,
            text,
        })
    }
}

/// Exit status and combined output of a captured invocation.
#[derive(Debug)]
pub struct Captured {
    /// Exit status of the tool.
    pub status: ExitStatus,
    /// Combined stdout and stderr, lossily decoded.
    pub text: String,
}

impl Captured {
    /// Whether the tool exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Errors from launching or waiting on an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_names_are_platform_suffixed() {
        if cfg!(windows) {
            assert_eq!(executable("doxygen"), "doxygen.exe");
        } else {
            assert_eq!(executable("doxygen"), "doxygen");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_merges_stdout_and_stderr() {
        let captured = ToolInvocation::new("sh")
            .args(["-c", "echo visible; echo hidden 1>&2"])
            .capture()
            .await
            .unwrap();

        assert!(captured.success());
        assert!(captured.text.contains("visible"));
        assert!(captured.text.contains("hidden"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_feeds_stdin_to_the_tool() {
        let captured = ToolInvocation::new("sh")
            .args(["-c", "cat"])
            .stdin(b"over stdin".to_vec())
            .capture()
            .await
            .unwrap();

        assert!(captured.success());
        assert_eq!(captured.text, "over stdin");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn status_surfaces_nonzero_exits() {
        let result = ToolInvocation::new("sh")
            .args(["-c", "exit 3"])
            .status()
            .await;

        match result {
            Err(ExecError::Exit { program, status }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected an exit error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn launch_failure_names_the_program() {
        let result = ToolInvocation::new("bindery-no-such-tool").status().await;

        assert!(matches!(result, Err(ExecError::Launch { .. })));
    }
}
