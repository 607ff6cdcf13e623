//! Ticket store - rule-gated ticket mutations
//!
//! The authoritative check always runs against the entry currently in
//! the map, not against whatever snapshot the caller rendered from.

use chrono::Utc;
use dashmap::DashMap;
use desk_common::{
    Comment, CommentId, DenyReason, DeskError, DeskResult, Priority, Role, Ticket, TicketId,
    TicketStatus, User,
};
use desk_rules::{
    access::has_at_least_role,
    comments::comment_decision,
    lifecycle::{self, AssignError},
    TicketQuery,
};

/// In-memory ticket store.
pub struct TicketStore {
    /// Tickets by ID
    tickets: DashMap<TicketId, Ticket>,
}

impl TicketStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    /// File a new ticket for `owner`. Status starts at `Open`.
    pub async fn create(
        &self,
        owner: &User,
        subject: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Ticket {
        let ticket = Ticket::new(
            TicketId::generate(),
            owner.clone(),
            subject,
            description,
            priority,
        );
        tracing::info!(ticket = %ticket.id, owner = %owner.id, "ticket created");
        self.tickets.insert(ticket.id.clone(), ticket.clone());
        ticket
    }

    /// Get a ticket by ID
    pub async fn get(&self, id: &TicketId) -> Option<Ticket> {
        self.tickets.get(id).map(|t| t.clone())
    }

    /// Filtered, ordered snapshot of the stored tickets
    pub async fn query(&self, query: &TicketQuery) -> Vec<Ticket> {
        let snapshot: Vec<Ticket> = self.tickets.iter().map(|t| t.clone()).collect();
        query
            .filter_and_sort(&snapshot)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Count stored tickets
    pub fn count(&self) -> usize {
        self.tickets.len()
    }

    /// Move a ticket to `to`, rechecking the rule against the live
    /// entry. The caller's rendered snapshot plays no part here.
    pub async fn transition(
        &self,
        actor: &User,
        id: &TicketId,
        to: TicketStatus,
    ) -> DeskResult<Ticket> {
        let mut entry = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| DeskError::TicketNotFound(id.clone()))?;
        let from = entry.status;

        if let Err(reason) = lifecycle::check_transition(actor, &entry, from, to) {
            tracing::warn!(ticket = %id, actor = %actor.id, ?from, ?to, ?reason, "transition denied");
            return Err(match reason {
                DenyReason::TicketClosed => DeskError::TicketClosed(id.clone()),
                DenyReason::TransitionNotAllowed => DeskError::InvalidTransition { from, to },
                other => DeskError::NotPermitted(other),
            });
        }

        let updated = lifecycle::apply_transition(&entry, to, Utc::now());
        *entry = updated;
        tracing::info!(ticket = %id, actor = %actor.id, ?from, ?to, "ticket transitioned");
        Ok(entry.clone())
    }

    /// Assign `candidate` to the ticket. The acting user must rank at
    /// least agent; the candidate must hold the agent role.
    pub async fn assign(
        &self,
        actor: &User,
        id: &TicketId,
        candidate: &User,
    ) -> DeskResult<Ticket> {
        if !has_at_least_role(Some(actor.role), Role::Agent) {
            tracing::warn!(ticket = %id, actor = %actor.id, "assignment denied");
            return Err(DeskError::NotPermitted(DenyReason::InsufficientRole));
        }
        let mut entry = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| DeskError::TicketNotFound(id.clone()))?;

        let updated = lifecycle::assign(&entry, candidate, Utc::now()).map_err(|e| match e {
            AssignError::InvalidAssignee(uid) => DeskError::InvalidAssignee(uid),
            AssignError::TicketClosed(tid) => DeskError::TicketClosed(tid),
        })?;
        *entry = updated;
        tracing::info!(ticket = %id, actor = %actor.id, assignee = %candidate.id, "ticket assigned");
        Ok(entry.clone())
    }

    /// Append a comment, rechecking the comment rule against the live
    /// entry.
    pub async fn add_comment(
        &self,
        actor: &User,
        id: &TicketId,
        content: impl Into<String>,
    ) -> DeskResult<Comment> {
        let mut entry = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| DeskError::TicketNotFound(id.clone()))?;

        let decision = comment_decision(actor, &entry);
        if let Some(reason) = decision.reason {
            tracing::warn!(ticket = %id, actor = %actor.id, ?reason, "comment denied");
            return Err(match reason {
                DenyReason::TicketClosed => DeskError::TicketClosed(id.clone()),
                other => DeskError::NotPermitted(other),
            });
        }

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::generate(),
            ticket_id: id.clone(),
            author: actor.clone(),
            content: content.into(),
            created_at: now,
        };
        entry.comments.push(comment.clone());
        entry.updated_at = now;
        Ok(comment)
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}
