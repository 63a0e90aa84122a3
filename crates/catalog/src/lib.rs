//! The closed catalog of named graph operations.
//!
//! Each entry declares its GraphQL document, its variables (required,
//! optional, or defaulted), and whether it may actually be sent to the graph
//! backend. Required-ness is enforced before dispatch so a missing variable
//! fails in-process instead of round-tripping to the server.

pub mod documents;
pub mod operation;
pub mod registry;
pub mod types;

pub use {
    operation::{Operation, OperationKind, Requirement, VarSpec},
    registry::Catalog,
};
