use std::sync::Arc;

use tracing::trace;

use crate::{credential::IdentityContext, store::CredentialStore};

/// Computes the identity context for every outgoing request.
///
/// The store is consulted on each call — never cached — so a login or logout
/// takes effect on the very next request. Signing never fails: a missing or
/// malformed credential degrades to [`IdentityContext::Anonymous`], which the
/// backends treat as their unprivileged role.
#[derive(Clone)]
pub struct RequestSigner {
    store: Arc<dyn CredentialStore>,
}

impl RequestSigner {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve the current identity from the credential store.
    pub fn identity(&self) -> IdentityContext {
        match self.store.get() {
            Some(cred) => IdentityContext::Authenticated(cred),
            None => IdentityContext::Anonymous,
        }
    }

    /// The authorization header value for the next request, or `None` when
    /// the header must be omitted.
    pub fn authorization(&self) -> Option<String> {
        let identity = self.identity();
        trace!(authenticated = identity.is_authenticated(), "signed request");
        identity.authorization()
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }
}
