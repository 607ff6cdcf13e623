//! User directory - user lookup and role assignment

use dashmap::DashMap;
use desk_common::{DenyReason, DeskError, DeskResult, Role, User, UserId};

/// In-memory user directory with an email index.
pub struct UserDirectory {
    /// Users by ID
    users: DashMap<UserId, User>,

    /// User IDs by email
    users_by_email: DashMap<String, UserId>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            users_by_email: DashMap::new(),
        }
    }

    /// Get user by ID
    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|u| u.clone())
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        let id = self.users_by_email.get(email)?.clone();
        self.get(&id).await
    }

    /// Add or update a user
    pub async fn upsert(&self, user: User) {
        self.users_by_email.insert(user.email.clone(), user.id.clone());
        self.users.insert(user.id.clone(), user);
    }

    /// Remove a user
    pub async fn remove(&self, id: &UserId) {
        if let Some((_, user)) = self.users.remove(id) {
            self.users_by_email.remove(&user.email);
        }
    }

    /// Snapshot of every user
    pub async fn all(&self) -> Vec<User> {
        self.users.iter().map(|u| u.clone()).collect()
    }

    /// Count users
    pub fn count(&self) -> usize {
        self.users.len()
    }

    /// The one sanctioned way a role changes: an admin assigns it.
    /// Returns the updated user.
    pub async fn set_role(&self, actor: &User, id: &UserId, role: Role) -> DeskResult<User> {
        if !actor.is_admin() {
            tracing::warn!(actor = %actor.id, target = %id, "role assignment denied");
            return Err(DeskError::NotPermitted(DenyReason::InsufficientRole));
        }
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| DeskError::UserNotFound(id.clone()))?;
        entry.role = role;
        entry.updated_at = chrono::Utc::now();
        tracing::info!(actor = %actor.id, target = %id, role = %role, "role assigned");
        Ok(entry.clone())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
