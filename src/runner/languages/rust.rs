//! Rust execution adapter

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::StressResult;
use crate::runner::{
    CompileOutcome, ExecutionResult, LanguageRunner, Workspace, run_compiler, run_with_input,
    write_source,
};

const MISSING_TOOLCHAIN: &str =
    "rustc compiler not found. Please install Rust and add it to your system's PATH.";

pub struct RustRunner {
    source: String,
    workspace: Workspace,
    executable: Option<PathBuf>,
    time_limit: Duration,
}

impl RustRunner {
    pub fn new(source: &str, time_limit: Duration) -> StressResult<Self> {
        Ok(Self {
            source: source.to_string(),
            workspace: Workspace::create()?,
            executable: None,
            time_limit,
        })
    }
}

#[async_trait]
impl LanguageRunner for RustRunner {
    async fn compile(&mut self) -> CompileOutcome {
        let source_file = match write_source(&self.workspace, "main.rs", &self.source).await {
            Ok(path) => path,
            Err(e) => return CompileOutcome::failed(format!("Failed to write source file: {e}")),
        };
        let executable = self.workspace.path().join("main");

        let mut cmd = Command::new("rustc");
        cmd.args(["-O", "-o"]).arg(&executable).arg(&source_file);

        let outcome = run_compiler(cmd, MISSING_TOOLCHAIN).await;
        if outcome.success {
            self.executable = Some(executable);
        }
        outcome
    }

    async fn run(&self, input: &str) -> ExecutionResult {
        let Some(executable) = self.executable.as_ref().filter(|path| path.exists()) else {
            return ExecutionResult::launch_failure("Executable not found");
        };
        run_with_input(Command::new(executable), input, self.time_limit).await
    }

    fn cleanup(&mut self) {
        self.workspace.close();
    }
}
