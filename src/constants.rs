//! Crate-wide constants
//!
//! Constant values used throughout the harness, grouped by purpose.

// =============================================================================
// EXECUTION DEFAULTS
// =============================================================================

/// Default per-run wall-clock timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 2.0;

/// Number of test cases between heartbeat messages
pub const HEARTBEAT_INTERVAL: u64 = 10;

/// Total width of the side-by-side diff rendering
pub const DEFAULT_DIFF_WIDTH: usize = 80;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language tag identifiers
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const RUST: &str = "rust";
    pub const JAVA: &str = "java";
    pub const PYTHON: &str = "python";

    /// All supported language tags
    pub const ALL: &[&str] = &[C, CPP, RUST, JAVA, PYTHON];
}

// =============================================================================
// WIRE PROTOCOL
// =============================================================================

/// Sentinels and payload prefixes for the plain-text message protocol.
///
/// Payload lines between the start and end sentinels belong to one
/// discrepancy frame and must be buffered by the consumer as a unit.
pub mod protocol {
    pub const DISCREPANCY_START: &str = "_DISCREPANCY_START_";
    pub const DISCREPANCY_END: &str = "_DISCREPANCY_END_";
    pub const INPUT_PREFIX: &str = "_INPUT_::";
    pub const OUTPUT_B_PREFIX: &str = "_OUTPUT_B_::";
    pub const OUTPUT_C_PREFIX: &str = "_OUTPUT_C_::";
    pub const DIFF_PREFIX: &str = "_DIFF_::";
}
