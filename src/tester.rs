//! Stress orchestrator
//!
//! Owns three execution adapters (generator, candidate B, candidate C),
//! drives the compile phase, then loops: generate an input, run both
//! candidates on it concurrently, compare, report. All progress streams
//! one-directionally through an unbounded message channel; the caller only
//! reads messages and may request a cooperative stop. Whatever path ends the
//! run, every workspace is cleaned up exactly once before the terminal phase
//! is reported.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::config::StressConfig;
use crate::constants::HEARTBEAT_INTERVAL;
use crate::diff;
use crate::error::StressResult;
use crate::message::{Candidate, LogMessage};
use crate::runner::{ExecutionResult, LanguageRunner};

/// States of one stress run.
///
/// `Idle → Compiling → (CompileFailed | Testing) → (Stopped | Failed)`.
/// `CompileFailed`, `Stopped` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Compiling,
    /// Terminal: one of the three programs did not compile; no case ran
    CompileFailed,
    Testing,
    /// Terminal: external stop request, or a discrepancy was found
    Stopped,
    /// Terminal: generator or candidate failure aborted the run
    Failed,
}

/// Caller-side handle to a running stress test.
pub struct StressHandle {
    stop: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    task: JoinHandle<Phase>,
}

impl StressHandle {
    /// Request a cooperative stop.
    ///
    /// Observed at the next iteration boundary; an in-flight subprocess call
    /// finishes naturally or hits its own timeout.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether the orchestrator loop is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait for the run to end and return its terminal phase.
    pub async fn wait(self) -> Phase {
        self.task.await.unwrap_or(Phase::Failed)
    }
}

/// Differential stress tester.
pub struct StressTester {
    generator: Box<dyn LanguageRunner>,
    candidate_b: Box<dyn LanguageRunner>,
    candidate_c: Box<dyn LanguageRunner>,
    log: UnboundedSender<LogMessage>,
    stop: Arc<AtomicBool>,
    case_count: u64,
    diff_width: usize,
}

impl StressTester {
    /// Validate the configuration, build the three adapters, and start the
    /// run on a background task.
    ///
    /// Returns the caller-side handle and the message stream. The channel is
    /// unbounded; the producer never blocks on a slow consumer.
    pub fn start(
        config: StressConfig,
    ) -> StressResult<(StressHandle, UnboundedReceiver<LogMessage>)> {
        config.validate()?;
        let time_limit = config.time_limit();

        let generator = config
            .generator
            .language
            .runner(&config.generator.source, time_limit)?;
        let candidate_b = config
            .candidate_b
            .language
            .runner(&config.candidate_b.source, time_limit)?;
        let candidate_c = config
            .candidate_c
            .language
            .runner(&config.candidate_c.source, time_limit)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicBool::new(true));

        let mut tester = StressTester {
            generator,
            candidate_b,
            candidate_c,
            log: tx,
            stop: stop.clone(),
            case_count: 0,
            diff_width: config.diff_width,
        };

        let running_flag = running.clone();
        let task = tokio::spawn(async move {
            let phase = tester.run_to_completion().await;
            tracing::info!(?phase, "Stress run finished");
            running_flag.store(false, Ordering::SeqCst);
            phase
        });

        Ok((StressHandle {
            stop,
            running,
            task,
        }, rx))
    }

    async fn run_to_completion(&mut self) -> Phase {
        let phase = self.drive().await;
        self.emit(LogMessage::Narrative("Stress test stopped.".to_string()));
        // Workspaces go away on every exit path, exactly once each.
        self.generator.cleanup();
        self.candidate_b.cleanup();
        self.candidate_c.cleanup();
        phase
    }

    async fn drive(&mut self) -> Phase {
        self.emit(LogMessage::Narrative("Starting stress test...".to_string()));
        if !self.compile_all().await {
            return Phase::CompileFailed;
        }
        self.emit(LogMessage::Narrative(
            "Compilation successful. Running tests...".to_string(),
        ));
        self.test_loop().await
    }

    /// Compile generator, candidate B, candidate C in sequence; stop at the
    /// first failure.
    async fn compile_all(&mut self) -> bool {
        self.emit(LogMessage::Narrative("Compiling generator...".to_string()));
        let outcome = self.generator.compile().await;
        if !outcome.success {
            self.emit(LogMessage::Narrative(format!(
                "Compilation failed for generator:\n{}",
                outcome.message
            )));
            return false;
        }

        self.emit(LogMessage::Narrative("Compiling candidate B...".to_string()));
        let outcome = self.candidate_b.compile().await;
        if !outcome.success {
            self.emit(LogMessage::Narrative(format!(
                "Compilation failed for candidate B:\n{}",
                outcome.message
            )));
            return false;
        }

        self.emit(LogMessage::Narrative("Compiling candidate C...".to_string()));
        let outcome = self.candidate_c.compile().await;
        if !outcome.success {
            self.emit(LogMessage::Narrative(format!(
                "Compilation failed for candidate C:\n{}",
                outcome.message
            )));
            return false;
        }

        true
    }

    async fn test_loop(&mut self) -> Phase {
        loop {
            if self.stop.load(Ordering::SeqCst) {
                return Phase::Stopped;
            }

            self.case_count += 1;
            let case = self.case_count;

            let generated = self.generator.run("").await;
            if !generated.is_success() {
                // The reproducing input does not exist here, so no
                // structured input payload accompanies this report.
                self.emit(LogMessage::Narrative(format!(
                    "Generator failed (Case {case}):\nError:\n{}\n(No input was produced)",
                    generated.stderr
                )));
                return Phase::Failed;
            }
            let input = generated.stdout;

            // Fork-join: both candidates run concurrently on the identical
            // input; the join is the barrier before comparison, and the
            // tuple slots keep the two results disjoint.
            let (result_b, result_c) =
                tokio::join!(self.candidate_b.run(&input), self.candidate_c.run(&input));

            if !result_b.is_success() {
                self.report_candidate_failure(Candidate::B, case, &result_b, &input);
                return Phase::Failed;
            }
            if !result_c.is_success() {
                self.report_candidate_failure(Candidate::C, case, &result_c, &input);
                return Phase::Failed;
            }

            // Whole-output trim only; internal whitespace stays significant.
            let output_b = result_b.stdout.trim();
            let output_c = result_c.stdout.trim();
            if output_b != output_c {
                self.report_discrepancy(case, &input, output_b, output_c);
                return Phase::Stopped;
            }

            if case % HEARTBEAT_INTERVAL == 0 {
                self.emit(LogMessage::Narrative(format!("Checked {case} cases...")));
            }
        }
    }

    fn report_candidate_failure(
        &self,
        candidate: Candidate,
        case: u64,
        result: &ExecutionResult,
        input: &str,
    ) {
        self.emit(LogMessage::Narrative(format!(
            "Candidate {candidate} failed (Case {case}):\nError:\n{}",
            result.stderr
        )));
        self.emit(LogMessage::Narrative(format!(
            "Input:\n---\n{}\n---",
            input.trim()
        )));
        self.emit(LogMessage::FailingInput(input.trim().to_string()));
    }

    fn report_discrepancy(&self, case: u64, input: &str, output_b: &str, output_c: &str) {
        self.emit(LogMessage::Narrative(format!(
            "Discrepancy found at Case {case}!"
        )));
        self.emit(LogMessage::DiscrepancyStart);
        self.emit(LogMessage::FailingInput(input.trim().to_string()));
        self.emit(LogMessage::CandidateOutput(
            Candidate::B,
            output_b.to_string(),
        ));
        self.emit(LogMessage::CandidateOutput(
            Candidate::C,
            output_c.to_string(),
        ));
        self.emit(LogMessage::Diff(diff::side_by_side(
            output_b,
            output_c,
            self.diff_width,
        )));
        self.emit(LogMessage::DiscrepancyEnd);
    }

    fn emit(&self, message: LogMessage) {
        // The consumer may be gone; dropping messages is fine then.
        let _ = self.log.send(message);
    }
}
