//! Caller identity: credential storage and request signing.
//!
//! The credential is a true optional — the `"undefined"` sentinel strings
//! that loosely-typed storage layers sometimes persist are normalized to the
//! absent state at the storage boundary, so the rest of the stack never does
//! string comparisons against magic values.

pub mod credential;
pub mod signer;
pub mod store;

pub use {
    credential::{Credential, IdentityContext},
    signer::RequestSigner,
    store::{CredentialStore, FileCredentialStore, MemoryCredentialStore},
};
