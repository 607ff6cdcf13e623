//! Error types for OpenDesk

use crate::{TicketId, TicketStatus, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable reason for a denied action. The UI maps these to
/// user-facing messages ("ticket is closed", "not your ticket") instead
/// of a generic failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    /// The ticket has reached its terminal state
    TicketClosed,
    /// The acting agent is not assigned to this ticket
    NotAssignee,
    /// The actor did not file this ticket
    NotOwner,
    /// Admins view comment threads but never post to them
    AdminReadOnly,
    /// The actor's role is below the required rank
    InsufficientRole,
    /// The requested status change is not in the transition table
    TransitionNotAllowed,
}

/// OpenDesk error type
#[derive(Error, Debug)]
pub enum DeskError {
    /// Ticket not found
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// User not found
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Assignee candidate does not hold the agent role
    #[error("invalid assignee {0}: not an agent")]
    InvalidAssignee(UserId),

    /// Mutation attempted on a closed ticket
    #[error("ticket {0} is closed")]
    TicketClosed(TicketId),

    /// Action denied by the rules engine
    #[error("not permitted: {0:?}")]
    NotPermitted(DenyReason),

    /// Status change outside the transition table
    #[error("invalid transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status
        from: TicketStatus,
        /// Requested status
        to: TicketStatus,
    },

    /// Role string the boundary could not normalize
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Result type for OpenDesk
pub type DeskResult<T> = Result<T, DeskError>;
