//! Ticket lifecycle state machine
//!
//! Transition table (`Closed` is terminal for everyone, admins too):
//!
//! | From        | To          | Allowed actor                     |
//! |-------------|-------------|-----------------------------------|
//! | Open        | InProgress  | assigned agent, admin             |
//! | InProgress  | Resolved    | assigned agent, admin             |
//! | Resolved    | Closed      | assigned agent, admin, owner      |
//! | any non-Closed | Closed   | admin (direct close)              |
//!
//! Anything not in the table is rejected.

use crate::Decision;
use chrono::{DateTime, Utc};
use desk_common::{DenyReason, Role, Ticket, TicketId, TicketStatus, User, UserId};
use thiserror::Error;

/// Why an assignment was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// Candidate does not hold the agent role
    #[error("invalid assignee {0}: not an agent")]
    InvalidAssignee(UserId),

    /// No (re)assignment once the ticket is closed
    #[error("ticket {0} is closed")]
    TicketClosed(TicketId),
}

/// Forward steps an assigned agent may drive.
#[inline]
fn is_forward_step(from: TicketStatus, to: TicketStatus) -> bool {
    use TicketStatus::*;
    matches!((from, to), (Open, InProgress) | (InProgress, Resolved) | (Resolved, Closed))
}

/// Full decision for a status change, with the denial reason.
pub fn transition_decision(
    actor: &User,
    ticket: &Ticket,
    from: TicketStatus,
    to: TicketStatus,
) -> Decision {
    if from.is_terminal() {
        return Decision::deny(DenyReason::TicketClosed);
    }

    // The requester confirms resolution by closing their own ticket.
    if from == TicketStatus::Resolved
        && to == TicketStatus::Closed
        && ticket.is_owned_by(&actor.id)
    {
        return Decision::allow();
    }

    match actor.role {
        Role::Admin => {
            if is_forward_step(from, to) || to == TicketStatus::Closed {
                Decision::allow()
            } else {
                Decision::deny(DenyReason::TransitionNotAllowed)
            }
        }
        Role::Agent => {
            if !is_forward_step(from, to) {
                Decision::deny(DenyReason::TransitionNotAllowed)
            } else if !ticket.is_assigned_to(&actor.id) {
                Decision::deny(DenyReason::NotAssignee)
            } else {
                Decision::allow()
            }
        }
        Role::User => {
            if from == TicketStatus::Resolved && to == TicketStatus::Closed {
                Decision::deny(DenyReason::NotOwner)
            } else {
                Decision::deny(DenyReason::TransitionNotAllowed)
            }
        }
    }
}

/// True iff `actor` may move `ticket` from `from` to `to`.
#[inline]
pub fn can_transition(
    actor: &User,
    ticket: &Ticket,
    from: TicketStatus,
    to: TicketStatus,
) -> bool {
    transition_decision(actor, ticket, from, to).allowed
}

/// Like [`can_transition`] but surfaces the denial reason as an error.
pub fn check_transition(
    actor: &User,
    ticket: &Ticket,
    from: TicketStatus,
    to: TicketStatus,
) -> Result<(), DenyReason> {
    match transition_decision(actor, ticket, from, to).reason {
        None => Ok(()),
        Some(reason) => Err(reason),
    }
}

/// True iff `actor` may edit ticket fields (subject, description,
/// priority, category). Closed tickets are read-only for everyone.
pub fn can_edit(actor: &User, ticket: &Ticket) -> bool {
    if ticket.status.is_terminal() {
        return false;
    }
    actor.is_admin() || ticket.is_assigned_to(&actor.id) || ticket.is_owned_by(&actor.id)
}

/// Assign (or reassign) `candidate` to the ticket. The candidate must
/// hold the agent role, and closed tickets cannot be reassigned.
/// Returns the updated copy; persisting it is the caller's job.
pub fn assign(
    ticket: &Ticket,
    candidate: &User,
    now: DateTime<Utc>,
) -> Result<Ticket, AssignError> {
    if ticket.status.is_terminal() {
        return Err(AssignError::TicketClosed(ticket.id.clone()));
    }
    if candidate.role != Role::Agent {
        return Err(AssignError::InvalidAssignee(candidate.id.clone()));
    }
    let mut updated = ticket.clone();
    updated.assignee = Some(candidate.clone());
    updated.updated_at = now;
    Ok(updated)
}

/// Stamp a status change onto the ticket. Callers must have passed
/// [`check_transition`] for the same snapshot first.
pub fn apply_transition(ticket: &Ticket, to: TicketStatus, now: DateTime<Utc>) -> Ticket {
    let mut updated = ticket.clone();
    updated.status = to;
    updated.updated_at = now;
    if to == TicketStatus::Resolved {
        updated.resolved_at = Some(now);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_common::{Priority, TicketId, UserId};

    fn user(id: &str, role: Role) -> User {
        User::new(UserId::new(id), id, format!("{id}@example.com")).with_role(role)
    }

    fn ticket(owner: &User) -> Ticket {
        Ticket::new(
            TicketId::new("t-1"),
            owner.clone(),
            "Laptop will not boot",
            "Black screen on power-up",
            Priority::High,
        )
    }

    #[test]
    fn test_unassigned_agent_cannot_start_work() {
        let owner = user("u-owner", Role::User);
        let agent = user("u-agent", Role::Agent);
        let t = ticket(&owner);

        assert!(!can_transition(&agent, &t, TicketStatus::Open, TicketStatus::InProgress));
        assert_eq!(
            check_transition(&agent, &t, TicketStatus::Open, TicketStatus::InProgress),
            Err(DenyReason::NotAssignee)
        );

        let assigned = assign(&t, &agent, Utc::now()).unwrap();
        assert!(can_transition(
            &agent,
            &assigned,
            TicketStatus::Open,
            TicketStatus::InProgress
        ));
    }

    #[test]
    fn test_closed_is_terminal_for_every_actor() {
        let owner = user("u-owner", Role::User);
        let admin = user("u-admin", Role::Admin);
        let mut t = ticket(&owner);
        t.status = TicketStatus::Closed;

        for to in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ] {
            assert!(!can_transition(&admin, &t, TicketStatus::Closed, to));
            assert!(!can_transition(&owner, &t, TicketStatus::Closed, to));
        }
        assert_eq!(
            check_transition(&admin, &t, TicketStatus::Closed, TicketStatus::Open),
            Err(DenyReason::TicketClosed)
        );
    }

    #[test]
    fn test_admin_direct_close_from_any_live_state() {
        let owner = user("u-owner", Role::User);
        let admin = user("u-admin", Role::Admin);
        let t = ticket(&owner);

        for from in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
        ] {
            assert!(can_transition(&admin, &t, from, TicketStatus::Closed));
        }
    }

    #[test]
    fn test_admin_cannot_skip_forward_states() {
        let owner = user("u-owner", Role::User);
        let admin = user("u-admin", Role::Admin);
        let t = ticket(&owner);

        // Open -> Resolved is not in the table, even for admins.
        assert!(!can_transition(&admin, &t, TicketStatus::Open, TicketStatus::Resolved));
    }

    #[test]
    fn test_owner_closes_only_resolved_tickets() {
        let owner = user("u-owner", Role::User);
        let t = ticket(&owner);

        assert!(can_transition(&owner, &t, TicketStatus::Resolved, TicketStatus::Closed));
        assert!(!can_transition(&owner, &t, TicketStatus::Open, TicketStatus::Closed));
        assert!(!can_transition(&owner, &t, TicketStatus::Open, TicketStatus::InProgress));
    }

    #[test]
    fn test_non_owner_user_cannot_close_resolved() {
        let owner = user("u-owner", Role::User);
        let stranger = user("u-other", Role::User);
        let t = ticket(&owner);

        assert_eq!(
            check_transition(&stranger, &t, TicketStatus::Resolved, TicketStatus::Closed),
            Err(DenyReason::NotOwner)
        );
    }

    #[test]
    fn test_assign_rejects_non_agents() {
        let owner = user("u-owner", Role::User);
        let t = ticket(&owner);

        for candidate in [user("u-user", Role::User), user("u-admin", Role::Admin)] {
            assert_eq!(
                assign(&t, &candidate, Utc::now()).unwrap_err(),
                AssignError::InvalidAssignee(candidate.id.clone())
            );
        }
    }

    #[test]
    fn test_reassignment_blocked_on_closed_ticket() {
        let owner = user("u-owner", Role::User);
        let agent = user("u-agent", Role::Agent);
        let mut t = ticket(&owner);
        t.status = TicketStatus::Closed;

        assert_eq!(
            assign(&t, &agent, Utc::now()).unwrap_err(),
            AssignError::TicketClosed(t.id.clone())
        );
    }

    #[test]
    fn test_reassignment_overwrites_assignee_while_live() {
        let owner = user("u-owner", Role::User);
        let first = user("u-agent-1", Role::Agent);
        let second = user("u-agent-2", Role::Agent);
        let t = ticket(&owner);

        let t = assign(&t, &first, Utc::now()).unwrap();
        let t = assign(&t, &second, Utc::now()).unwrap();
        assert!(t.is_assigned_to(&second.id));
    }

    #[test]
    fn test_apply_transition_stamps_resolved_at() {
        let owner = user("u-owner", Role::User);
        let t = ticket(&owner);
        let now = Utc::now();

        let resolved = apply_transition(&t, TicketStatus::Resolved, now);
        assert_eq!(resolved.status, TicketStatus::Resolved);
        assert_eq!(resolved.resolved_at, Some(now));

        let closed = apply_transition(&resolved, TicketStatus::Closed, now);
        assert_eq!(closed.resolved_at, Some(now));
    }

    #[test]
    fn test_edit_rights() {
        let owner = user("u-owner", Role::User);
        let agent = user("u-agent", Role::Agent);
        let admin = user("u-admin", Role::Admin);
        let stranger = user("u-other", Role::User);
        let t = ticket(&owner);

        assert!(can_edit(&owner, &t));
        assert!(can_edit(&admin, &t));
        assert!(!can_edit(&agent, &t));
        assert!(!can_edit(&stranger, &t));

        let t = assign(&t, &agent, Utc::now()).unwrap();
        assert!(can_edit(&agent, &t));

        let mut closed = t.clone();
        closed.status = TicketStatus::Closed;
        assert!(!can_edit(&owner, &closed));
        assert!(!can_edit(&admin, &closed));
        assert!(!can_edit(&agent, &closed));
    }
}
