//! Typed messages streamed from the orchestrator to its consumer

use serde::{Deserialize, Serialize};

use crate::constants::protocol;

/// Identity of one of the two programs under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    B,
    C,
}

impl Candidate {
    pub fn label(&self) -> &'static str {
        match self {
            Candidate::B => "B",
            Candidate::C => "C",
        }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One message on the orchestrator's stream.
///
/// Structured discrepancy reporting is framed: the payload variants between
/// [`DiscrepancyStart`] and [`DiscrepancyEnd`] describe one discrepancy and
/// must be buffered by the consumer as one atomic unit. A [`FailingInput`]
/// outside any frame carries the last input that reproduced a candidate
/// failure, so it stays retrievable even when the run did not end in a
/// discrepancy.
///
/// [`DiscrepancyStart`]: LogMessage::DiscrepancyStart
/// [`DiscrepancyEnd`]: LogMessage::DiscrepancyEnd
/// [`FailingInput`]: LogMessage::FailingInput
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogMessage {
    /// Free-form narrative: phase transitions, heartbeats, failure reports
    Narrative(String),
    DiscrepancyStart,
    /// Input payload of a discrepancy frame, or the reproducing input of a
    /// candidate failure
    FailingInput(String),
    /// Stdout of one candidate inside a discrepancy frame
    CandidateOutput(Candidate, String),
    /// Rendered side-by-side diff of the two candidate outputs
    Diff(String),
    DiscrepancyEnd,
}

impl LogMessage {
    /// Render as one line of the plain-text wire protocol.
    pub fn to_wire(&self) -> String {
        match self {
            LogMessage::Narrative(text) => text.clone(),
            LogMessage::DiscrepancyStart => protocol::DISCREPANCY_START.to_string(),
            LogMessage::FailingInput(input) => format!("{}{input}", protocol::INPUT_PREFIX),
            LogMessage::CandidateOutput(Candidate::B, output) => {
                format!("{}{output}", protocol::OUTPUT_B_PREFIX)
            }
            LogMessage::CandidateOutput(Candidate::C, output) => {
                format!("{}{output}", protocol::OUTPUT_C_PREFIX)
            }
            LogMessage::Diff(diff) => format!("{}{diff}", protocol::DIFF_PREFIX),
            LogMessage::DiscrepancyEnd => protocol::DISCREPANCY_END.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_rendering_matches_protocol() {
        assert_eq!(
            LogMessage::DiscrepancyStart.to_wire(),
            "_DISCREPANCY_START_"
        );
        assert_eq!(LogMessage::DiscrepancyEnd.to_wire(), "_DISCREPANCY_END_");
        assert_eq!(
            LogMessage::FailingInput("5".into()).to_wire(),
            "_INPUT_::5"
        );
        assert_eq!(
            LogMessage::CandidateOutput(Candidate::B, "6".into()).to_wire(),
            "_OUTPUT_B_::6"
        );
        assert_eq!(
            LogMessage::CandidateOutput(Candidate::C, "7".into()).to_wire(),
            "_OUTPUT_C_::7"
        );
        assert_eq!(LogMessage::Diff("x".into()).to_wire(), "_DIFF_::x");
        assert_eq!(
            LogMessage::Narrative("plain line".into()).to_wire(),
            "plain line"
        );
    }

    #[test]
    fn messages_survive_json_transport() {
        // Consumers may ship the stream as JSON; framing and payloads must
        // come back intact.
        let frame = vec![
            LogMessage::DiscrepancyStart,
            LogMessage::FailingInput("7".into()),
            LogMessage::CandidateOutput(Candidate::B, "7".into()),
            LogMessage::CandidateOutput(Candidate::C, "8".into()),
            LogMessage::DiscrepancyEnd,
        ];
        let encoded = serde_json::to_string(&frame).unwrap();
        let decoded: Vec<LogMessage> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.len(), frame.len());
        for (before, after) in frame.iter().zip(&decoded) {
            assert_eq!(before.to_wire(), after.to_wire());
        }
    }

    #[test]
    fn payload_text_resembling_sentinels_stays_unambiguous() {
        // The tagged union keeps framing explicit even when a payload line
        // contains sentinel-looking text.
        let message = LogMessage::FailingInput("_DISCREPANCY_END_".into());
        assert!(matches!(message, LogMessage::FailingInput(_)));
        assert_eq!(message.to_wire(), "_INPUT_::_DISCREPANCY_END_");
    }
}
