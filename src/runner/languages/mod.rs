//! Language-specific adapters and the factory that selects them

pub mod c;
pub mod cpp;
pub mod java;
pub mod python;
pub mod rust;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{StressError, StressResult};

use super::LanguageRunner;

/// Supported languages, parsed from their wire tags.
///
/// Tags are validated before any orchestration starts; an unknown tag is
/// signaled as absence, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Rust,
    Java,
    Python,
}

impl Language {
    /// Parse a language tag, turning an unknown tag into a typed error for
    /// callers that want to fail fast.
    pub fn parse(tag: &str) -> StressResult<Self> {
        Self::from_tag(tag).ok_or_else(|| StressError::UnsupportedLanguage(tag.to_string()))
    }

    /// Parse a language tag; unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            constants::languages::C => Some(Language::C),
            constants::languages::CPP => Some(Language::Cpp),
            constants::languages::RUST => Some(Language::Rust),
            constants::languages::JAVA => Some(Language::Java),
            constants::languages::PYTHON => Some(Language::Python),
            _ => None,
        }
    }

    /// The wire tag for this language
    pub fn tag(&self) -> &'static str {
        match self {
            Language::C => constants::languages::C,
            Language::Cpp => constants::languages::CPP,
            Language::Rust => constants::languages::RUST,
            Language::Java => constants::languages::JAVA,
            Language::Python => constants::languages::PYTHON,
        }
    }

    /// Build the execution adapter for this language.
    ///
    /// The adapter owns a freshly created workspace; workspace creation is
    /// the only fallible step and fails before any test case runs.
    pub fn runner(
        &self,
        source: &str,
        time_limit: Duration,
    ) -> StressResult<Box<dyn LanguageRunner>> {
        Ok(match self {
            Language::C => Box::new(c::CRunner::new(source, time_limit)?),
            Language::Cpp => Box::new(cpp::CppRunner::new(source, time_limit)?),
            Language::Rust => Box::new(rust::RustRunner::new(source, time_limit)?),
            Language::Java => Box::new(java::JavaRunner::new(source, time_limit)?),
            Language::Python => Box::new(python::PythonRunner::new(source, time_limit)?),
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_tag_parses() {
        for tag in constants::languages::ALL {
            let language = Language::from_tag(tag).expect("supported tag must parse");
            assert_eq!(language.tag(), *tag);
        }
    }

    #[test]
    fn unknown_tags_yield_no_adapter() {
        assert_eq!(Language::from_tag("brainfuck"), None);
        assert_eq!(Language::from_tag(""), None);
        assert_eq!(Language::from_tag("Python"), None);
    }

    #[test]
    fn parse_surfaces_a_typed_error() {
        assert_eq!(Language::parse("cpp").unwrap(), Language::Cpp);
        let err = Language::parse("cobol").unwrap_err();
        assert!(matches!(err, StressError::UnsupportedLanguage(tag) if tag == "cobol"));
    }
}
