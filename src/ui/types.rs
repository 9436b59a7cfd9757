//! UI type definitions for the application state machine.

use std::time::{Duration, Instant};

use crate::types::{Draft, DraftField, ReplyTarget};

/// Which screen is currently active
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PageList,
    Thread,
}

/// Loading state for async operations
#[derive(Clone, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading(String), // Message to display
}

/// How long the success acknowledgment stays up before the composer
/// closes on its own
pub const SUCCESS_CLOSE_DELAY: Duration = Duration::from_millis(2500);

/// The comment composer state machine.
///
/// closed → open (new or reply) → submitting → success → closed, with
/// submit failures re-arming the open state and the draft preserved.
/// Exactly one composer exists; at most one submission is in flight.
#[derive(Clone, PartialEq, Eq)]
pub enum ComposeState {
    Closed,
    Open {
        draft: Draft,
        focus: DraftField,
        /// Validation or submit failure shown inside the composer
        error: Option<String>,
    },
    /// POST in flight; the submit action is disabled until it resolves
    Submitting { draft: Draft },
    Success { since: Instant },
}

impl ComposeState {
    /// Open the composer for a new top-level comment. Fields always start
    /// empty; drafts never persist across opens.
    pub fn open_new() -> Self {
        ComposeState::Open {
            draft: Draft::new(None),
            focus: DraftField::Name,
            error: None,
        }
    }

    /// Open the composer for a reply to a specific comment
    pub fn open_reply(parent_id: String, parent_author: String) -> Self {
        ComposeState::Open {
            draft: Draft::new(Some(ReplyTarget {
                parent_id,
                parent_author,
            })),
            focus: DraftField::Name,
            error: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ComposeState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ComposeState::Submitting { .. })
    }

    /// Whether the success acknowledgment has been up long enough to
    /// close without user action
    pub fn success_expired(&self, now: Instant) -> bool {
        matches!(self, ComposeState::Success { since } if now.duration_since(*since) >= SUCCESS_CLOSE_DELAY)
    }
}

/// Cycle order for composer field focus
pub fn next_field(field: DraftField) -> DraftField {
    match field {
        DraftField::Name => DraftField::Email,
        DraftField::Email => DraftField::Content,
        DraftField::Content => DraftField::Name,
    }
}
