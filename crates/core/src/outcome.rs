//! Feedback copy and visual treatment for each scored outcome.

use std::borrow::Cow;

use crate::model::{Outcome, OutcomeStatus};

/// Colour tone of an outcome badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

impl Emphasis {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeIcon {
    Check,
    Cross,
    None,
}

/// Rendered feedback for one response; independent of the question itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeFeedback {
    pub label: Cow<'static, str>,
    pub headline: Cow<'static, str>,
    pub body: &'static str,
    pub emphasis: Emphasis,
    pub icon: OutcomeIcon,
}

const fn fixed(
    label: &'static str,
    headline: &'static str,
    body: &'static str,
    emphasis: Emphasis,
    icon: OutcomeIcon,
) -> OutcomeFeedback {
    OutcomeFeedback {
        label: Cow::Borrowed(label),
        headline: Cow::Borrowed(headline),
        body,
        emphasis,
        icon,
    }
}

impl Outcome {
    #[must_use]
    pub fn feedback(self) -> OutcomeFeedback {
        match self {
            Outcome::SureCorrect => fixed(
                "Sure & Correct",
                "The answer is correct!",
                "Great job — you've mastered this question like a pro!",
                Emphasis::Success,
                OutcomeIcon::Check,
            ),
            Outcome::NotSureCorrect => fixed(
                "Not Sure & Correct",
                "Correct answer — but not sure.",
                "Check the quick summary below to refresh your understanding!",
                Emphasis::Info,
                OutcomeIcon::Check,
            ),
            Outcome::NotSureIncorrect => fixed(
                "Not Sure & Incorrect",
                "Incorrect answer — and unsure about it.",
                "Go through the attached document to strengthen your understanding!",
                Emphasis::Warning,
                OutcomeIcon::Cross,
            ),
            Outcome::SureIncorrect => fixed(
                "Sure & Incorrect",
                "Incorrect answer — but you seemed confident.",
                "Check the attached document to clear up the concept!",
                Emphasis::Danger,
                OutcomeIcon::Cross,
            ),
        }
    }
}

/// Map a status from the scorer to its feedback.
///
/// Statuses outside the four known outcomes render as their humanized text
/// with neutral emphasis.
#[must_use]
pub fn classify(status: &OutcomeStatus) -> OutcomeFeedback {
    match status {
        OutcomeStatus::Known(outcome) => outcome.feedback(),
        OutcomeStatus::Unknown(raw) => {
            let text = humanize(raw);
            OutcomeFeedback {
                label: Cow::Owned(text.clone()),
                headline: Cow::Owned(text),
                body: "",
                emphasis: Emphasis::Neutral,
                icon: OutcomeIcon::None,
            }
        }
    }
}

fn humanize(raw: &str) -> String {
    let text = raw
        .split(['_', '-'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return "Unknown".to_string();
    }
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_sure_incorrect_uses_fixed_template() {
        let feedback = classify(&OutcomeStatus::parse("not_sure_incorrect"));
        assert_eq!(feedback.headline, "Incorrect answer — and unsure about it.");
        assert_eq!(feedback.label, "Not Sure & Incorrect");
        assert_eq!(feedback.emphasis, Emphasis::Warning);
        assert_eq!(feedback.icon, OutcomeIcon::Cross);
    }

    #[test]
    fn every_known_outcome_has_distinct_copy() {
        let headlines: std::collections::HashSet<_> = Outcome::ALL
            .into_iter()
            .map(|o| o.feedback().headline)
            .collect();
        assert_eq!(headlines.len(), 4);
        assert!(Outcome::ALL
            .into_iter()
            .all(|o| o.feedback().emphasis != Emphasis::Neutral));
    }

    #[test]
    fn unknown_status_falls_back_to_humanized_text() {
        let feedback = classify(&OutcomeStatus::parse("partially_correct"));
        assert_eq!(feedback.label, "Partially correct");
        assert_eq!(feedback.emphasis, Emphasis::Neutral);
        assert_eq!(feedback.icon, OutcomeIcon::None);
        assert!(feedback.body.is_empty());
    }

    #[test]
    fn blank_status_still_renders() {
        assert_eq!(classify(&OutcomeStatus::parse("__")).label, "Unknown");
    }
}
