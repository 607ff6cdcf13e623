//! OpenDesk Store - In-memory directory and ticket store
//!
//! Backing store for the dashboard's rules engine. Every mutation path
//! re-reads the live entry and re-runs the relevant rule against that
//! snapshot before applying it, so a stale ticket held by the UI can
//! never authorize a change the current state would forbid.
//!
//! Persistence proper (the remote REST API) sits behind the same
//! interface shape; this store doubles as the test double for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod repository;
pub mod tickets;

pub use directory::UserDirectory;
pub use repository::{TicketRepository, UserSource};
pub use tickets::TicketStore;
