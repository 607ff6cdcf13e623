//! Dashboard statistics
//!
//! Pure aggregation over an in-memory ticket set, feeding the admin
//! analytics view.

use desk_common::{Priority, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};

/// Ticket counts per priority bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    /// `LOW` tickets
    pub low: usize,
    /// `MEDIUM` tickets
    pub medium: usize,
    /// `HIGH` tickets
    pub high: usize,
    /// `URGENT` tickets
    pub urgent: usize,
}

/// Aggregate numbers for the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All tickets
    pub total: usize,
    /// `OPEN` tickets
    pub open: usize,
    /// `IN_PROGRESS` tickets
    pub in_progress: usize,
    /// `RESOLVED` tickets
    pub resolved: usize,
    /// `CLOSED` tickets
    pub closed: usize,
    /// Counts per priority
    pub by_priority: PriorityCounts,
    /// Mean hours from creation to resolution, over tickets that have
    /// a resolution timestamp. Zero when none do.
    pub avg_resolution_hours: f64,
}

impl DashboardStats {
    /// Compute the aggregate over a ticket set.
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut stats = Self {
            total: tickets.len(),
            ..Default::default()
        };

        let mut resolved_secs: i64 = 0;
        let mut resolved_n: usize = 0;

        for ticket in tickets {
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
            match ticket.priority {
                Priority::Low => stats.by_priority.low += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::High => stats.by_priority.high += 1,
                Priority::Urgent => stats.by_priority.urgent += 1,
            }
            if let Some(resolved_at) = ticket.resolved_at {
                resolved_secs += (resolved_at - ticket.created_at).num_seconds().max(0);
                resolved_n += 1;
            }
        }

        if resolved_n > 0 {
            stats.avg_resolution_hours = resolved_secs as f64 / resolved_n as f64 / 3600.0;
        }
        stats
    }
}
