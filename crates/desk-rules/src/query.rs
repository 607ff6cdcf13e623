//! Ticket query/filter model
//!
//! A `TicketQuery` is a pure predicate plus an ordering: the same query
//! over the same slice always yields the same sequence, so list views
//! re-render deterministically and tests need no fixtures beyond the
//! tickets themselves.

use desk_common::{Priority, Ticket, TicketStatus, UserId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Filter on a ticket party (assignee or owner)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyFilter {
    /// No constraint
    #[default]
    Any,
    /// Matches only tickets with no assignee. Owners are always set,
    /// so on the owner side this matches nothing.
    Unassigned,
    /// Matches the given user id
    Id(UserId),
}

impl PartyFilter {
    #[inline]
    fn matches(&self, party: Option<&UserId>) -> bool {
        match self {
            PartyFilter::Any => true,
            PartyFilter::Unassigned => party.is_none(),
            PartyFilter::Id(id) => party == Some(id),
        }
    }
}

/// Sort key for ticket lists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Creation timestamp
    #[default]
    CreatedAt,
    /// Priority weight (`URGENT=4 .. LOW=1`)
    Priority,
    /// Status weight (`OPEN=1 .. CLOSED=4`)
    Status,
    /// Case-insensitive subject
    Subject,
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending (the dashboard default: newest first)
    #[default]
    Desc,
}

/// Filter and sort criteria for a ticket list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketQuery {
    /// Case-insensitive substring over subject, description, and owner
    /// display name; any field matching passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Status equality filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// Priority equality filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Assignee filter
    #[serde(default)]
    pub assignee: PartyFilter,

    /// Owner filter
    #[serde(default)]
    pub owner: PartyFilter,

    /// Sort key
    #[serde(default)]
    pub sort: SortKey,

    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl TicketQuery {
    /// Match against a single ticket
    #[inline]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        // Check free-text search
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            if !needle.is_empty()
                && !ticket.subject.to_lowercase().contains(&needle)
                && !ticket.description.to_lowercase().contains(&needle)
                && !ticket.owner.name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        // Check status
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }

        // Check priority
        if let Some(priority) = self.priority {
            if ticket.priority != priority {
                return false;
            }
        }

        // Check parties
        if !self.assignee.matches(ticket.assignee_id()) {
            return false;
        }
        if !self.owner.matches(Some(&ticket.owner.id)) {
            return false;
        }

        true
    }

    /// Lazy, restartable pass over the tickets that match. Repeated
    /// calls with the same inputs yield the same items.
    pub fn filter<'s, 'a>(
        &'s self,
        tickets: &'a [Ticket],
    ) -> impl Iterator<Item = &'a Ticket> + use<'s, 'a> {
        tickets.iter().filter(move |t| self.matches(t))
    }

    /// Filtered, ordered view of the tickets. The sort is stable:
    /// entries equal on the sort key keep their relative input order.
    pub fn filter_and_sort<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        let mut out: Vec<&Ticket> = self.filter(tickets).collect();
        out.sort_by(|a, b| self.compare(a, b));
        out
    }

    #[inline]
    fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        let ord = match self.sort {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Priority => a.priority.sort_weight().cmp(&b.priority.sort_weight()),
            SortKey::Status => a.status.sort_weight().cmp(&b.status.sort_weight()),
            SortKey::Subject => a
                .subject
                .to_lowercase()
                .cmp(&b.subject.to_lowercase()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}
