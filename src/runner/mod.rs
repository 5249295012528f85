//! Per-language execution adapters
//!
//! Each adapter owns an ephemeral workspace, materializes one program's
//! source into it, compiles it where the language requires that, and executes
//! it against a given input under a wall-clock budget. No fault escapes
//! `compile`, `run` or `cleanup`: every failure mode is folded into a typed
//! outcome so the orchestrator only ever sees results.

pub mod languages;

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{StressError, StressResult};

pub use languages::Language;

/// How a program execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitStatus {
    /// Process exited on its own with this code
    Normal(i32),
    /// Wall-clock budget expired before the process finished
    Timeout,
    /// Executable or interpreter could not be launched
    LaunchFailure,
    /// Unexpected harness-side fault during execution
    InternalError,
}

impl ExitStatus {
    /// Clean, zero exit
    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Normal(0))
    }
}

/// Captured outcome of one program execution. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl ExecutionResult {
    /// Process exited on its own
    pub fn normal(code: i32, stdout: String, stderr: String) -> Self {
        Self {
            stdout,
            stderr,
            status: ExitStatus::Normal(code),
        }
    }

    /// Wall-clock budget expired; stderr is the literal `"Timeout"`
    pub fn timeout() -> Self {
        Self {
            stdout: String::new(),
            stderr: "Timeout".to_string(),
            status: ExitStatus::Timeout,
        }
    }

    /// Executable or interpreter missing
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            status: ExitStatus::LaunchFailure,
        }
    }

    /// Unexpected fault, described in stderr
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            status: ExitStatus::InternalError,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Outcome of a compile phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOutcome {
    pub success: bool,
    pub message: String,
}

impl CompileOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: "Compilation successful".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Ephemeral build directory, owned by exactly one adapter.
///
/// Created at adapter construction, removed exactly once by [`close`].
///
/// [`close`]: Workspace::close
#[derive(Debug)]
pub struct Workspace {
    dir: Option<tempfile::TempDir>,
    path: PathBuf,
}

impl Workspace {
    pub fn create() -> StressResult<Self> {
        let dir = tempfile::tempdir().map_err(StressError::Workspace)?;
        let path = dir.path().to_path_buf();
        tracing::debug!(workspace = %path.display(), "Created workspace");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Best-effort removal. Idempotent and tolerant of a tree that is
    /// already gone.
    pub fn close(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                tracing::warn!(workspace = %self.path.display(), "Failed to remove workspace: {}", e);
            }
        }
    }
}

/// Capability contract implemented once per language.
#[async_trait]
pub trait LanguageRunner: Send {
    /// Materialize the source file and, for compiled languages, invoke the
    /// toolchain. Must be called before any [`run`](LanguageRunner::run).
    async fn compile(&mut self) -> CompileOutcome;

    /// Execute against `input` under the wall-clock budget. Never fails:
    /// every fault is folded into the returned result.
    async fn run(&self, input: &str) -> ExecutionResult;

    /// Remove the workspace. Idempotent.
    fn cleanup(&mut self);
}

/// Write a program's source text into its workspace.
pub(crate) async fn write_source(
    workspace: &Workspace,
    file_name: &str,
    source: &str,
) -> std::io::Result<PathBuf> {
    let path = workspace.path().join(file_name);
    tokio::fs::write(&path, source).await?;
    Ok(path)
}

/// Run a prepared command, feeding `input` on stdin and capturing both output
/// streams, bounded by `limit`.
///
/// Stdin is written concurrently with output capture so a child that fills
/// its stdout pipe before draining stdin cannot deadlock the call. On expiry
/// the child is killed and the fixed [`ExecutionResult::timeout`] shape is
/// returned.
pub(crate) async fn run_with_input(
    mut cmd: Command,
    input: &str,
    limit: Duration,
) -> ExecutionResult {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let program = cmd.as_std().get_program().to_string_lossy().into_owned();
            return ExecutionResult::launch_failure(format!(
                "{program} not found. Please ensure it is installed and on your PATH."
            ));
        }
        Err(e) => return ExecutionResult::internal_error(e.to_string()),
    };

    let stdin = child.stdin.take();
    let payload = input.as_bytes().to_vec();
    let feed = async move {
        if let Some(mut pipe) = stdin {
            let _ = pipe.write_all(&payload).await;
            let _ = pipe.shutdown().await;
        }
    };

    match timeout(limit, async { tokio::join!(feed, child.wait_with_output()) }).await {
        Ok(((), Ok(output))) => ExecutionResult::normal(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ),
        Ok(((), Err(e))) => ExecutionResult::internal_error(e.to_string()),
        // Dropping the timed-out future reaps the child via kill_on_drop.
        Err(_) => ExecutionResult::timeout(),
    }
}

/// Invoke a compiler and fold its outcome into a [`CompileOutcome`].
///
/// `missing` is the fixed diagnostic used when the toolchain binary itself
/// cannot be found on the PATH.
pub(crate) async fn run_compiler(mut cmd: Command, missing: &str) -> CompileOutcome {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match cmd.output().await {
        Ok(output) if output.status.success() => CompileOutcome::ok(),
        Ok(output) => {
            CompileOutcome::failed(String::from_utf8_lossy(&output.stderr).into_owned())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CompileOutcome::failed(missing),
        Err(e) => CompileOutcome::failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_output_and_exit_code() {
        let result = run_with_input(sh("cat; echo err >&2"), "hello\n", Duration::from_secs(5)).await;
        assert_eq!(result.status, ExitStatus::Normal(0));
        assert_eq!(result.stdout, "hello\n");
        assert_eq!(result.stderr, "err\n");
        assert!(result.is_success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_reported() {
        let result = run_with_input(sh("exit 7"), "", Duration::from_secs(5)).await;
        assert_eq!(result.status, ExitStatus::Normal(7));
        assert!(!result.is_success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_yields_fixed_stderr() {
        let result = run_with_input(sh("sleep 5"), "", Duration::from_millis(200)).await;
        assert_eq!(result.status, ExitStatus::Timeout);
        assert_eq!(result.stderr, "Timeout");
        assert!(result.stdout.is_empty());
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_failure() {
        let cmd = Command::new("stressjudge-no-such-binary");
        let result = run_with_input(cmd, "", Duration::from_secs(1)).await;
        assert_eq!(result.status, ExitStatus::LaunchFailure);
        assert!(result.stderr.contains("not found"));
    }

    #[tokio::test]
    async fn missing_compiler_uses_fixed_message() {
        let cmd = Command::new("stressjudge-no-such-compiler");
        let outcome = run_compiler(cmd, "compiler not found, install it first").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "compiler not found, install it first");
    }

    #[test]
    fn workspace_close_is_idempotent() {
        let mut workspace = Workspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        assert!(path.exists());
        workspace.close();
        assert!(!path.exists());
        workspace.close();
    }
}
