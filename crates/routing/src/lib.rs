//! Route logical user actions to the right backend.
//!
//! Routing table (policy, declared once in [`action::route`]):
//! 1. Relational reads (event search/detail, my events, tickets, bookmark
//!    pages) → graph backend
//! 2. Ticket issuance → graph mutation (pure data write)
//! 3. Event creation, comments, login, signup → graph mutations/actions
//! 4. Bookmark add/remove/toggle → secondary service
//! 5. Payment initialization → secondary service
//! 6. File upload → secondary service
//!
//! Callers see one uniform result contract regardless of path.

pub mod action;
pub mod router;

pub use {
    action::{Action, CreateEventInput, Delegated, Route, route},
    router::{Router, SessionInfo},
};
