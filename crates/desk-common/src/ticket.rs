//! Tickets, comments, and attachments

use crate::{AttachmentId, CommentId, TicketId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket lifecycle status. `Open` is the initial state; `Closed` is
/// terminal for every actor, admins included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Newly filed, nobody working it yet
    #[default]
    Open,
    /// An agent is working the ticket
    InProgress,
    /// Fix delivered, awaiting confirmation
    Resolved,
    /// Terminal: read-only for everyone
    Closed,
}

impl TicketStatus {
    /// True if no further transition or mutation is permitted
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Closed)
    }

    /// Weight used when sorting by status
    #[inline]
    pub fn sort_weight(&self) -> u8 {
        match self {
            TicketStatus::Open => 1,
            TicketStatus::InProgress => 2,
            TicketStatus::Resolved => 3,
            TicketStatus::Closed => 4,
        }
    }
}

/// Ticket priority. Unordered except for its sort weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Low priority
    Low,
    /// Default priority
    #[default]
    Medium,
    /// High priority
    High,
    /// Needs immediate attention
    Urgent,
}

impl Priority {
    /// Weight used when sorting by priority
    #[inline]
    pub fn sort_weight(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

/// A support ticket
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID
    pub id: TicketId,

    /// Short subject line
    pub subject: String,

    /// Full problem description
    pub description: String,

    /// Lifecycle status
    pub status: TicketStatus,

    /// Priority
    pub priority: Priority,

    /// Optional category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The user who filed the ticket (set at creation, immutable)
    pub owner: User,

    /// Assigned agent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,

    /// Append-only comment thread
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Attachment metadata (storage lives in the file service)
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Satisfaction rating left by the owner after resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Free-text feedback accompanying the rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Set when the ticket entered `Resolved`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// File a new ticket. Status starts at `Open`.
    pub fn new(
        id: TicketId,
        owner: User,
        subject: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            subject: subject.into(),
            description: description.into(),
            status: TicketStatus::Open,
            priority,
            category: None,
            owner,
            assignee: None,
            comments: vec![],
            attachments: vec![],
            rating: None,
            feedback: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    /// Id of the assigned agent, if any
    #[inline]
    pub fn assignee_id(&self) -> Option<&UserId> {
        self.assignee.as_ref().map(|u| &u.id)
    }

    /// True if `user_id` filed this ticket
    #[inline]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner.id == user_id
    }

    /// True if `user_id` is the assigned agent
    #[inline]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assignee_id() == Some(user_id)
    }
}

/// A comment on a ticket. Append-only; the rules layer defines no edit
/// or delete path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID
    pub id: CommentId,

    /// Owning ticket
    pub ticket_id: TicketId,

    /// Author
    pub author: User,

    /// Free-text content
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Attachment metadata. Upload and storage belong to the file storage
/// service; this is read-only to the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment ID
    pub id: AttachmentId,

    /// Owning ticket
    pub ticket_id: TicketId,

    /// Stored filename
    pub filename: String,

    /// Size in bytes
    pub size: u64,

    /// MIME type
    pub mime_type: String,

    /// Uploader
    pub uploaded_by: UserId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
