use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use quiz_core::SubmissionPayload;
use quiz_core::model::{AssignmentId, AssignmentResults, AttemptId, UserId};

use crate::error::AssessmentError;

#[derive(Debug, Default)]
struct Flags {
    in_flight: AtomicBool,
    submitted: AtomicBool,
}

/// At-most-once latch for an attempt's single network submission.
///
/// Clones share state, so a copy held by a view sees the same latch as the
/// session that owns it.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    flags: Arc<Flags>,
}

impl SubmissionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the only permit to submit.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::AlreadySubmitted` once a submission succeeded,
    /// or `AssessmentError::SubmissionInFlight` while another permit is alive.
    pub fn try_acquire(&self) -> Result<SubmissionPermit, AssessmentError> {
        if self.is_submitted() {
            return Err(AssessmentError::AlreadySubmitted);
        }
        if self
            .flags
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AssessmentError::SubmissionInFlight);
        }
        let permit = SubmissionPermit {
            flags: Arc::clone(&self.flags),
        };
        if self.is_submitted() {
            return Err(AssessmentError::AlreadySubmitted);
        }
        Ok(permit)
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.flags.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.flags.submitted.load(Ordering::Acquire)
    }
}

/// Proof that the holder is the only submitter. Dropping it without
/// [`SubmissionPermit::complete`] reopens the gate for a retry.
#[derive(Debug)]
pub struct SubmissionPermit {
    flags: Arc<Flags>,
}

impl SubmissionPermit {
    /// Close the gate for good.
    pub fn complete(self) {
        self.flags.submitted.store(true, Ordering::Release);
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.flags.in_flight.store(false, Ordering::Release);
    }
}

/// A resolved payload plus the permit to send it.
#[derive(Debug)]
pub struct SubmissionTicket {
    pub(crate) user: UserId,
    pub(crate) assignment: AssignmentId,
    pub(crate) attempt: AttemptId,
    pub(crate) payload: SubmissionPayload,
    pub(crate) permit: SubmissionPermit,
}

impl SubmissionTicket {
    #[must_use]
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    #[must_use]
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }
}

/// Scored results of an accepted submission, waiting to be recorded on the
/// session that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedAttempt {
    pub attempt: AttemptId,
    pub submitted_answers: usize,
    pub results: AssignmentResults,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_permit_is_refused_while_first_lives() {
        let gate = SubmissionGate::new();
        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_in_flight());
        assert!(matches!(
            gate.try_acquire(),
            Err(AssessmentError::SubmissionInFlight)
        ));
        drop(permit);
        assert!(!gate.is_in_flight());
        assert!(gate.try_acquire().is_ok());
    }

    #[test]
    fn completed_permit_closes_the_gate() {
        let gate = SubmissionGate::new();
        let shared = gate.clone();
        gate.try_acquire().unwrap().complete();

        assert!(shared.is_submitted());
        assert!(!shared.is_in_flight());
        assert!(matches!(
            shared.try_acquire(),
            Err(AssessmentError::AlreadySubmitted)
        ));
    }
}
