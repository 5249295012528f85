//! stressjudge - Differential stress-testing harness
//!
//! Given a generator program and two candidate programs, this crate
//! repeatedly produces a fresh random input, feeds it to both candidates,
//! and halts the moment their normalized outputs diverge or either program
//! fails, surfacing the exact failing input and a rendered side-by-side
//! diff.
//!
//! # Architecture
//!
//! - **`runner`**: per-language execution adapters (compile/run/cleanup)
//!   behind one capability trait, selected through a factory keyed by
//!   language tag
//! - **`tester`**: the orchestrator loop driving generation, concurrent dual
//!   execution, comparison, and reporting
//! - **`diff`**: LCS-based side-by-side line diff rendering
//! - **`message`**: the typed message stream a consumer reads
//!
//! # Example
//!
//! ```no_run
//! use stressjudge::{Language, ProgramSpec, StressConfig, StressTester};
//!
//! # async fn run() -> stressjudge::StressResult<()> {
//! let config = StressConfig::new(
//!     ProgramSpec::new("import random\nprint(random.randint(1, 100))", Language::Python),
//!     ProgramSpec::new("print(int(input()) * 2)", Language::Python),
//!     ProgramSpec::new("n = int(input())\nprint(n + n)", Language::Python),
//!     2.0,
//! );
//! let (handle, mut messages) = StressTester::start(config)?;
//! while let Some(message) = messages.recv().await {
//!     println!("{}", message.to_wire());
//! }
//! let _phase = handle.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod message;
pub mod runner;
pub mod tester;

// Re-export commonly used types
pub use config::{ProgramSpec, StressConfig};
pub use error::{StressError, StressResult};
pub use message::{Candidate, LogMessage};
pub use runner::{CompileOutcome, ExecutionResult, ExitStatus, Language, LanguageRunner};
pub use tester::{Phase, StressHandle, StressTester};
