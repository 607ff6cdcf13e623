//! OpenDesk Rules Engine
//!
//! Pure decision functions behind the support dashboard: who may see a
//! page, who may move a ticket through its lifecycle, who may comment,
//! and which tickets a query shows in what order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI / API layer                        │
//! │                                                              │
//! │   page load          mutation request        list render     │
//! │       │                     │                     │          │
//! │       ▼                     ▼                     ▼          │
//! │  ┌─────────┐   ┌──────────────────────┐   ┌──────────────┐   │
//! │  │ access  │   │ lifecycle / comments │   │    query     │   │
//! │  │ (guard) │   │  (transition gates)  │   │ (filter/sort)│   │
//! │  └─────────┘   └──────────────────────┘   └──────────────┘   │
//! │       │                     │                     │          │
//! │    outcome              Decision              ordered set    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is synchronous, side-effect free, and takes the
//! acting user explicitly; nothing reads ambient session state. All
//! gates fail closed: inputs outside the enumerated tables are denied,
//! never guessed at.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod comments;
pub mod lifecycle;
pub mod query;
pub mod stats;

pub use access::{has_at_least_role, GuardOutcome, PageGuard};
pub use comments::{can_comment, comment_decision};
pub use lifecycle::{
    apply_transition, assign, can_edit, can_transition, check_transition, transition_decision,
    AssignError,
};
pub use query::{PartyFilter, SortDirection, SortKey, TicketQuery};
pub use stats::DashboardStats;

use desk_common::DenyReason;

/// Outcome of a rule evaluation: allowed, or denied with a reason the
/// UI can surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Whether the action may proceed
    pub allowed: bool,
    /// Set when `allowed` is false
    pub reason: Option<DenyReason>,
}

impl Decision {
    /// Permit the action
    #[inline]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// Deny the action with a reason
    #[inline]
    pub fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}
