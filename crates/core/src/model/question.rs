use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::media::MediaRef;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least {min} options, got {count}")]
    TooFewOptions { count: usize, min: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },
}

//
// ─── OPTIONS ──────────────────────────────────────────────────────────────────
//

/// Position of an option as the learner sees it.
///
/// Only meaningful together with the question it was taken from; it is turned
/// into an [`OptionText`] when the submission payload is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionIndex(usize);

impl OptionIndex {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text of an option, the form the scoring service expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionText(String);

impl OptionText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OptionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as delivered for an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    media: Option<MediaRef>,
    reference_document: Option<String>,
}

impl Question {
    pub const MIN_OPTIONS: usize = 2;

    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, fewer than two options are
    /// given, or any option is blank.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < Self::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
                min: Self::MIN_OPTIONS,
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        Ok(Self {
            id,
            text,
            options,
            media: None,
            reference_document: None,
        })
    }

    #[must_use]
    pub fn with_media(mut self, media: Option<MediaRef>) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_reference_document(mut self, path: Option<String>) -> Self {
        self.reference_document = path.filter(|p| !p.trim().is_empty());
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn has_option(&self, index: OptionIndex) -> bool {
        index.value() < self.options.len()
    }

    /// Resolve a positional selection into the option text.
    #[must_use]
    pub fn resolve(&self, index: OptionIndex) -> Option<OptionText> {
        self.options
            .get(index.value())
            .map(|text| OptionText(text.clone()))
    }

    #[must_use]
    pub fn media(&self) -> Option<&MediaRef> {
        self.media.as_ref()
    }

    #[must_use]
    pub fn reference_document(&self) -> Option<&str> {
        self.reference_document.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new(1), "Q", options(&["only"])).unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { count: 1, min: 2 });
    }

    #[test]
    fn rejects_blank_text_and_options() {
        assert_eq!(
            Question::new(QuestionId::new(1), "  ", options(&["a", "b"])).unwrap_err(),
            QuestionError::EmptyText
        );
        assert_eq!(
            Question::new(QuestionId::new(1), "Q", options(&["a", " "])).unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
    }

    #[test]
    fn resolves_option_by_position() {
        let q = Question::new(QuestionId::new(1), "Capital?", options(&["Paris", "Rome"])).unwrap();
        assert_eq!(q.resolve(OptionIndex::new(1)).unwrap().as_str(), "Rome");
        assert!(q.resolve(OptionIndex::new(2)).is_none());
        assert!(!q.has_option(OptionIndex::new(2)));
    }

    #[test]
    fn blank_reference_document_is_dropped() {
        let q = Question::new(QuestionId::new(1), "Q", options(&["a", "b"]))
            .unwrap()
            .with_reference_document(Some(String::new()));
        assert!(q.reference_document().is_none());
    }
}
