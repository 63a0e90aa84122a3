//! Shared error definitions and result types used across all minab crates.

pub mod error;

pub use error::{Error, ErrorKind, MinabError, Result};
