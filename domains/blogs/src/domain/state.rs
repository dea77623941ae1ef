//! Blog review workflow state machine
//!
//! Draft → UnderReview on submit, UnderReview → Published on approval,
//! UnderReview → Draft when a reviewer sends it back. Published blogs
//! are final.

pub use scriptly_common::StateError;

use crate::domain::entities::BlogStatus;

/// Events that trigger blog state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlogEvent {
    /// Author asks for review
    Submit,
    /// Reviewer approves for publication
    Approve,
    /// Reviewer sends the blog back to drafts
    Reject,
}

impl BlogEvent {
    /// Event that moves a blog to the requested status
    pub fn toward(target: BlogStatus) -> Self {
        match target {
            BlogStatus::Draft => Self::Reject,
            BlogStatus::UnderReview => Self::Submit,
            BlogStatus::Published => Self::Approve,
        }
    }
}

impl std::fmt::Display for BlogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Blog state machine
pub struct BlogStateMachine;

impl BlogStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(current: BlogStatus, event: BlogEvent) -> Result<BlogStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (BlogStatus::Draft, BlogEvent::Submit) => BlogStatus::UnderReview,
            (BlogStatus::UnderReview, BlogEvent::Approve) => BlogStatus::Published,
            (BlogStatus::UnderReview, BlogEvent::Reject) => BlogStatus::Draft,
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: BlogStatus, event: &BlogEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}
