/// An opaque session bearer token.
///
/// Invariant: the inner string is non-empty and is never one of the literal
/// absence sentinels (`"undefined"`, `"null"`) that loosely-typed upstreams
/// have been known to persist. Construction goes through [`Credential::parse`],
/// which normalizes all of those to `None` — so holding a `Credential` means
/// holding a real token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

/// Stringified absence markers that must never be forwarded as tokens.
const ABSENT_SENTINELS: &[&str] = &["undefined", "null"];

impl Credential {
    /// Normalize a raw stored value into a credential.
    ///
    /// Empty strings, whitespace-only strings, and the absence sentinels all
    /// yield `None` — the explicit absent state, not an error.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || ABSENT_SENTINELS.contains(&trimmed) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens must not leak into logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The resolved caller identity attached to a request.
///
/// `Anonymous` is the default and a fully supported mode: the backend maps a
/// missing authorization value to its unprivileged role rather than rejecting
/// the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityContext {
    Authenticated(Credential),
    Anonymous,
}

impl IdentityContext {
    /// The authorization header value for this identity.
    ///
    /// `None` means the header is omitted entirely — never an empty or
    /// malformed value.
    pub fn authorization(&self) -> Option<String> {
        match self {
            Self::Authenticated(cred) => Some(format!("Bearer {}", cred.as_str())),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_real_token() {
        let cred = Credential::parse("eyJhbGciOiJIUzI1NiJ9.abc.def").unwrap();
        assert_eq!(cred.as_str(), "eyJhbGciOiJIUzI1NiJ9.abc.def");
    }

    #[test]
    fn parse_normalizes_absence_markers() {
        assert!(Credential::parse("").is_none());
        assert!(Credential::parse("   ").is_none());
        assert!(Credential::parse("undefined").is_none());
        assert!(Credential::parse("null").is_none());
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let cred = Credential::parse("  tok123\n").unwrap();
        assert_eq!(cred.as_str(), "tok123");
    }

    #[test]
    fn authorization_value_is_bearer_scheme_exactly() {
        let ctx = IdentityContext::Authenticated(Credential::parse("tok123").unwrap());
        assert_eq!(ctx.authorization().as_deref(), Some("Bearer tok123"));
    }

    #[test]
    fn anonymous_has_no_authorization_value() {
        assert_eq!(IdentityContext::Anonymous.authorization(), None);
        assert!(!IdentityContext::Anonymous.is_authenticated());
    }

    #[test]
    fn debug_redacts_token() {
        let cred = Credential::parse("super-secret").unwrap();
        let dbg = format!("{cred:?}");
        assert!(!dbg.contains("super-secret"));
    }
}
