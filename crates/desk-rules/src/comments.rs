//! Comment permission policy
//!
//! The legacy dashboard carried two near-duplicate comment gates that
//! disagreed about admins. The policy here is the restrictive reading,
//! confirmed as the intended one: admins read every thread but never
//! post; agents post only on tickets assigned to them; users post only
//! on tickets they filed; closed tickets take no comments from anyone.

use crate::Decision;
use desk_common::{DenyReason, Role, Ticket, User};

/// Full decision for appending a comment, with the denial reason.
pub fn comment_decision(actor: &User, ticket: &Ticket) -> Decision {
    if ticket.status.is_terminal() {
        return Decision::deny(DenyReason::TicketClosed);
    }
    match actor.role {
        Role::Admin => Decision::deny(DenyReason::AdminReadOnly),
        Role::Agent => {
            if ticket.is_assigned_to(&actor.id) {
                Decision::allow()
            } else {
                Decision::deny(DenyReason::NotAssignee)
            }
        }
        Role::User => {
            if ticket.is_owned_by(&actor.id) {
                Decision::allow()
            } else {
                Decision::deny(DenyReason::NotOwner)
            }
        }
    }
}

/// True iff `actor` may append a comment to `ticket`.
#[inline]
pub fn can_comment(actor: &User, ticket: &Ticket) -> bool {
    comment_decision(actor, ticket).allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_common::{Priority, TicketId, TicketStatus, UserId};

    fn user(id: &str, role: Role) -> User {
        User::new(UserId::new(id), id, format!("{id}@example.com")).with_role(role)
    }

    fn ticket(owner: &User, status: TicketStatus) -> Ticket {
        let mut t = Ticket::new(
            TicketId::new("t-1"),
            owner.clone(),
            "Email bouncing",
            "All outbound mail rejected",
            Priority::Medium,
        );
        t.status = status;
        t
    }

    #[test]
    fn test_admin_never_posts() {
        let owner = user("u-owner", Role::User);
        let admin = user("u-admin", Role::Admin);

        for status in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
        ] {
            let t = ticket(&owner, status);
            assert!(!can_comment(&admin, &t));
            assert_eq!(
                comment_decision(&admin, &t).reason,
                Some(DenyReason::AdminReadOnly)
            );
        }
    }

    #[test]
    fn test_owner_posts_until_closed() {
        let owner = user("u-owner", Role::User);

        assert!(can_comment(&owner, &ticket(&owner, TicketStatus::Open)));
        assert!(can_comment(&owner, &ticket(&owner, TicketStatus::Resolved)));
        assert!(!can_comment(&owner, &ticket(&owner, TicketStatus::Closed)));
    }

    #[test]
    fn test_closed_ticket_reason_wins_for_everyone() {
        let owner = user("u-owner", Role::User);
        let admin = user("u-admin", Role::Admin);
        let t = ticket(&owner, TicketStatus::Closed);

        for actor in [&owner, &admin] {
            assert_eq!(
                comment_decision(actor, &t).reason,
                Some(DenyReason::TicketClosed)
            );
        }
    }

    #[test]
    fn test_agent_posts_only_when_assigned() {
        let owner = user("u-owner", Role::User);
        let agent = user("u-agent", Role::Agent);
        let mut t = ticket(&owner, TicketStatus::InProgress);

        assert!(!can_comment(&agent, &t));
        assert_eq!(
            comment_decision(&agent, &t).reason,
            Some(DenyReason::NotAssignee)
        );

        t.assignee = Some(agent.clone());
        assert!(can_comment(&agent, &t));
    }

    #[test]
    fn test_stranger_user_cannot_post() {
        let owner = user("u-owner", Role::User);
        let stranger = user("u-other", Role::User);
        let t = ticket(&owner, TicketStatus::Open);

        assert_eq!(
            comment_decision(&stranger, &t).reason,
            Some(DenyReason::NotOwner)
        );
    }
}
