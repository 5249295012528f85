//! Python execution adapter
//!
//! Interpreted: `compile` only materializes the source file and always
//! succeeds. A missing interpreter surfaces at run time as a launch failure.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::StressResult;
use crate::runner::{
    CompileOutcome, ExecutionResult, LanguageRunner, Workspace, run_with_input, write_source,
};

pub struct PythonRunner {
    source: String,
    workspace: Workspace,
    script: Option<PathBuf>,
    time_limit: Duration,
}

impl PythonRunner {
    pub fn new(source: &str, time_limit: Duration) -> StressResult<Self> {
        Ok(Self {
            source: source.to_string(),
            workspace: Workspace::create()?,
            script: None,
            time_limit,
        })
    }
}

#[async_trait]
impl LanguageRunner for PythonRunner {
    async fn compile(&mut self) -> CompileOutcome {
        match write_source(&self.workspace, "script.py", &self.source).await {
            Ok(path) => {
                self.script = Some(path);
                CompileOutcome::ok()
            }
            Err(e) => CompileOutcome::failed(format!("Failed to write source file: {e}")),
        }
    }

    async fn run(&self, input: &str) -> ExecutionResult {
        let Some(script) = &self.script else {
            return ExecutionResult::launch_failure("Script not found");
        };
        let mut cmd = Command::new("python3");
        cmd.arg(script);
        run_with_input(cmd, input, self.time_limit).await
    }

    fn cleanup(&mut self) {
        self.workspace.close();
    }
}
