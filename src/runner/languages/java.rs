//! Java execution adapter
//!
//! Java binds the public class name to the file name, so the harness
//! standardizes on a single fixed entry point: the source must declare
//! `class Main`. A mismatching class name surfaces as a compile failure.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::StressResult;
use crate::runner::{
    CompileOutcome, ExecutionResult, LanguageRunner, Workspace, run_compiler, run_with_input,
    write_source,
};

const MISSING_TOOLCHAIN: &str =
    "javac compiler not found. Please install a JDK and add it to your system's PATH.";

pub struct JavaRunner {
    source: String,
    workspace: Workspace,
    compiled: bool,
    time_limit: Duration,
}

impl JavaRunner {
    pub fn new(source: &str, time_limit: Duration) -> StressResult<Self> {
        Ok(Self {
            source: source.to_string(),
            workspace: Workspace::create()?,
            compiled: false,
            time_limit,
        })
    }
}

#[async_trait]
impl LanguageRunner for JavaRunner {
    async fn compile(&mut self) -> CompileOutcome {
        let source_file = match write_source(&self.workspace, "Main.java", &self.source).await {
            Ok(path) => path,
            Err(e) => return CompileOutcome::failed(format!("Failed to write source file: {e}")),
        };

        let mut cmd = Command::new("javac");
        cmd.arg(&source_file);

        let outcome = run_compiler(cmd, MISSING_TOOLCHAIN).await;
        if outcome.success {
            self.compiled = true;
        }
        outcome
    }

    async fn run(&self, input: &str) -> ExecutionResult {
        if !self.compiled {
            return ExecutionResult::launch_failure("Class files not found");
        }
        let mut cmd = Command::new("java");
        cmd.arg("-cp").arg(self.workspace.path()).arg("Main");
        run_with_input(cmd, input, self.time_limit).await
    }

    fn cleanup(&mut self) {
        self.workspace.close();
    }
}
