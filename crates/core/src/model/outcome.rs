use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown outcome status: {0}")]
pub struct OutcomeParseError(pub String);

/// Scored result of one response: correctness crossed with confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    SureCorrect,
    NotSureCorrect,
    NotSureIncorrect,
    SureIncorrect,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::SureCorrect,
        Outcome::NotSureCorrect,
        Outcome::NotSureIncorrect,
        Outcome::SureIncorrect,
    ];

    #[must_use]
    pub fn from_parts(correct: bool, sure: bool) -> Self {
        match (correct, sure) {
            (true, true) => Self::SureCorrect,
            (true, false) => Self::NotSureCorrect,
            (false, false) => Self::NotSureIncorrect,
            (false, true) => Self::SureIncorrect,
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::SureCorrect | Self::NotSureCorrect)
    }

    #[must_use]
    pub fn is_sure(self) -> bool {
        matches!(self, Self::SureCorrect | Self::SureIncorrect)
    }

    /// Wire name used by the scoring service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SureCorrect => "sure_correct",
            Self::NotSureCorrect => "not_sure_correct",
            Self::NotSureIncorrect => "not_sure_incorrect",
            Self::SureIncorrect => "sure_incorrect",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = OutcomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| OutcomeParseError(s.to_string()))
    }
}

/// Status exactly as received from the scorer.
///
/// Unrecognised values are kept verbatim so the renderer can fall back
/// instead of failing the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutcomeStatus {
    Known(Outcome),
    Unknown(String),
}

impl OutcomeStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<Outcome>()
            .map_or_else(|_| Self::Unknown(raw.to_string()), Self::Known)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Known(outcome) => Some(*outcome),
            Self::Unknown(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(outcome) => outcome.as_str(),
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OutcomeStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OutcomeStatus> for String {
    fn from(status: OutcomeStatus) -> Self {
        status.as_str().to_string()
    }
}

impl From<Outcome> for OutcomeStatus {
    fn from(outcome: Outcome) -> Self {
        Self::Known(outcome)
    }
}
