//! Persistence abstraction
//!
//! The dashboard talks to these traits, not to a concrete store: in
//! production they sit in front of the remote REST API, in tests the
//! in-memory store implements them directly. Either way the rules run
//! inside the implementation, against the freshest state it holds.

use crate::{TicketStore, UserDirectory};
use async_trait::async_trait;
use desk_common::{Comment, DeskError, DeskResult, Ticket, TicketId, TicketStatus, User, UserId};
use desk_rules::TicketQuery;

/// Read and mutate tickets. Mutations are rule-gated.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Fetch one ticket
    async fn fetch_ticket(&self, id: &TicketId) -> DeskResult<Ticket>;

    /// Fetch the filtered, ordered ticket list
    async fn fetch_tickets(&self, query: &TicketQuery) -> DeskResult<Vec<Ticket>>;

    /// Persist a status change on behalf of `actor`
    async fn persist_transition(
        &self,
        actor: &User,
        id: &TicketId,
        to: TicketStatus,
    ) -> DeskResult<Ticket>;

    /// Persist an assignment on behalf of `actor`
    async fn persist_assignment(
        &self,
        actor: &User,
        id: &TicketId,
        assignee: &User,
    ) -> DeskResult<Ticket>;

    /// Persist a new comment on behalf of `actor`
    async fn persist_comment(
        &self,
        actor: &User,
        id: &TicketId,
        content: &str,
    ) -> DeskResult<Comment>;
}

/// Read access to the user population.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch one user
    async fn fetch_user(&self, id: &UserId) -> DeskResult<User>;

    /// Fetch every user
    async fn fetch_users(&self) -> DeskResult<Vec<User>>;
}

#[async_trait]
impl TicketRepository for TicketStore {
    async fn fetch_ticket(&self, id: &TicketId) -> DeskResult<Ticket> {
        self.get(id)
            .await
            .ok_or_else(|| DeskError::TicketNotFound(id.clone()))
    }

    async fn fetch_tickets(&self, query: &TicketQuery) -> DeskResult<Vec<Ticket>> {
        Ok(self.query(query).await)
    }

    async fn persist_transition(
        &self,
        actor: &User,
        id: &TicketId,
        to: TicketStatus,
    ) -> DeskResult<Ticket> {
        self.transition(actor, id, to).await
    }

    async fn persist_assignment(
        &self,
        actor: &User,
        id: &TicketId,
        assignee: &User,
    ) -> DeskResult<Ticket> {
        self.assign(actor, id, assignee).await
    }

    async fn persist_comment(
        &self,
        actor: &User,
        id: &TicketId,
        content: &str,
    ) -> DeskResult<Comment> {
        self.add_comment(actor, id, content).await
    }
}

#[async_trait]
impl UserSource for UserDirectory {
    async fn fetch_user(&self, id: &UserId) -> DeskResult<User> {
        self.get(id)
            .await
            .ok_or_else(|| DeskError::UserNotFound(id.clone()))
    }

    async fn fetch_users(&self) -> DeskResult<Vec<User>> {
        Ok(self.all().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_common::{Priority, Role};

    #[tokio::test]
    async fn test_store_behind_trait_objects() {
        let store = TicketStore::new();
        let owner = User::new(UserId::new("u-1"), "Pat", "pat@example.com");
        let ticket = store
            .create(&owner, "Slow intranet", "Pages take 30s", Priority::Medium)
            .await;

        let repo: &dyn TicketRepository = &store;
        let fetched = repo.fetch_ticket(&ticket.id).await.unwrap();
        assert_eq!(fetched.id, ticket.id);

        let missing = repo.fetch_ticket(&TicketId::new("ghost")).await;
        assert!(matches!(missing, Err(DeskError::TicketNotFound(_))));

        let comment = repo
            .persist_comment(&owner, &ticket.id, "any update?")
            .await
            .unwrap();
        assert_eq!(comment.ticket_id, ticket.id);

        let dir = UserDirectory::new();
        dir.upsert(owner.clone().with_role(Role::User)).await;
        let users: &dyn UserSource = &dir;
        assert_eq!(users.fetch_users().await.unwrap().len(), 1);
        assert!(matches!(
            users.fetch_user(&UserId::new("ghost")).await,
            Err(DeskError::UserNotFound(_))
        ));
    }
}
