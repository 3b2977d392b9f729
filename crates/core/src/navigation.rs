//! Navigation predicates derived from a session snapshot.

use crate::session::{Phase, SessionState};

/// Which navigation controls are enabled for a session snapshot.
///
/// Recomputed from the session on every render; holds no state of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_submit: bool,
    /// The confidence prompt is open; the session refuses to move until it closes.
    pub locked: bool,
}

impl Navigation {
    #[must_use]
    pub fn from_session(session: &SessionState) -> Self {
        let active = matches!(
            session.phase(),
            Phase::InProgress | Phase::AwaitingConfidence | Phase::ReadyToSubmit
        );
        if !active {
            return Self::default();
        }

        let index = session.current_index();
        let last = session.len().saturating_sub(1);
        Self {
            can_go_previous: index > 0,
            can_go_next: index < last && session.is_current_answered(),
            can_submit: index == last && session.phase() == Phase::ReadyToSubmit,
            locked: session.phase() == Phase::AwaitingConfidence,
        }
    }

    /// Whether the last question is showing, i.e. submit replaces next.
    #[must_use]
    pub fn on_last_question(session: &SessionState) -> bool {
        session.len() > 0 && session.current_index() + 1 == session.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{fixtures::two_categories, flatten};
    use crate::model::{OptionIndex, QuestionId};
    use crate::time::fixed_now;

    fn started() -> SessionState {
        SessionState::started(flatten(&two_categories()), fixed_now()).unwrap()
    }

    fn settle_current(session: &mut SessionState) {
        let id = session.current_question().unwrap().id();
        session.select_answer(id, OptionIndex::new(0));
        session.confirm_confidence(id, true);
    }

    #[test]
    fn first_unanswered_question_allows_nothing() {
        let nav = Navigation::from_session(&started());
        assert_eq!(nav, Navigation::default());
    }

    #[test]
    fn answered_question_enables_next() {
        let mut session = started();
        session.select_answer(QuestionId::new(1), OptionIndex::new(0));
        let nav = Navigation::from_session(&session);
        assert!(nav.can_go_next);
        assert!(nav.locked);

        session.confirm_confidence(QuestionId::new(1), true);
        let nav = Navigation::from_session(&session);
        assert!(nav.can_go_next);
        assert!(!nav.locked);
    }

    #[test]
    fn submit_only_on_last_question_when_ready() {
        let mut session = started();
        settle_current(&mut session);
        session.advance();
        settle_current(&mut session);
        session.advance();
        assert!(Navigation::on_last_question(&session));
        assert!(!Navigation::from_session(&session).can_submit);

        settle_current(&mut session);
        let nav = Navigation::from_session(&session);
        assert!(nav.can_submit);
        assert!(nav.can_go_previous);
        assert!(!nav.can_go_next);

        session.retreat();
        assert!(!Navigation::from_session(&session).can_submit);
    }

    #[test]
    fn not_started_session_has_no_navigation() {
        assert_eq!(
            Navigation::from_session(&SessionState::new()),
            Navigation::default()
        );
    }
}
