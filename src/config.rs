//! Harness configuration supplied by the caller
//!
//! Validated before any adapter (and therefore any workspace) is
//! constructed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DIFF_WIDTH, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{StressError, StressResult};
use crate::runner::Language;

/// One program: its source text and the language it is written in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSpec {
    pub source: String,
    pub language: Language,
}

impl ProgramSpec {
    pub fn new(source: impl Into<String>, language: Language) -> Self {
        Self {
            source: source.into(),
            language,
        }
    }
}

/// Full configuration for one stress run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressConfig {
    /// Program that produces a fresh test input, invoked with empty stdin
    pub generator: ProgramSpec,
    /// First candidate under comparison
    pub candidate_b: ProgramSpec,
    /// Second candidate under comparison
    pub candidate_c: ProgramSpec,
    /// Per-run wall-clock timeout in seconds
    pub timeout_secs: f64,
    /// Nominal total width of the rendered diff
    pub diff_width: usize,
}

impl StressConfig {
    pub fn new(
        generator: ProgramSpec,
        candidate_b: ProgramSpec,
        candidate_c: ProgramSpec,
        timeout_secs: f64,
    ) -> Self {
        Self {
            generator,
            candidate_b,
            candidate_c,
            timeout_secs,
            diff_width: DEFAULT_DIFF_WIDTH,
        }
    }

    /// Reject invalid timeouts before any workspace exists.
    ///
    /// A timeout must be a positive number of seconds that `Duration` can
    /// represent; NaN, infinities and overflowing values are all rejected
    /// here rather than surfacing later as a fault.
    pub fn validate(&self) -> StressResult<()> {
        if self.timeout_secs <= 0.0 || Duration::try_from_secs_f64(self.timeout_secs).is_err() {
            return Err(StressError::InvalidTimeout(self.timeout_secs));
        }
        Ok(())
    }

    pub(crate) fn time_limit(&self) -> Duration {
        // validate() guarantees the conversion succeeds
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::MAX)
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self::new(
            ProgramSpec::new("", Language::Python),
            ProgramSpec::new("", Language::Python),
            ProgramSpec::new("", Language::Python),
            DEFAULT_TIMEOUT_SECONDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_timeout(timeout_secs: f64) -> StressConfig {
        StressConfig {
            timeout_secs,
            ..StressConfig::default()
        }
    }

    #[test]
    fn positive_timeout_is_accepted() {
        assert!(config_with_timeout(1.5).validate().is_ok());
        assert!(config_with_timeout(0.1).validate().is_ok());
    }

    #[test]
    fn non_positive_timeouts_are_rejected() {
        assert!(matches!(
            config_with_timeout(0.0).validate(),
            Err(StressError::InvalidTimeout(_))
        ));
        assert!(matches!(
            config_with_timeout(-2.0).validate(),
            Err(StressError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn non_finite_timeouts_are_rejected() {
        assert!(config_with_timeout(f64::NAN).validate().is_err());
        assert!(config_with_timeout(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn timeouts_beyond_duration_range_are_rejected() {
        // Finite and positive, but not representable as a Duration; must be
        // rejected up front instead of blowing up when the run starts.
        let config = config_with_timeout(1e300);
        assert!(matches!(
            config.validate(),
            Err(StressError::InvalidTimeout(_))
        ));
        assert!(config_with_timeout(f64::MAX).validate().is_err());
    }

    #[test]
    fn accepted_timeouts_convert_to_a_duration() {
        let config = config_with_timeout(1.5);
        config.validate().unwrap();
        assert_eq!(config.time_limit(), Duration::from_millis(1500));
    }
}
