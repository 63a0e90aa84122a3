use {
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Machine-readable failure class, attached to every [`Error`].
///
/// Presentation code branches on this, never on message text:
/// `Caller` failures are bugs at the call site (fix the call),
/// `Unauthenticated` is recoverable by logging in and repeating the action,
/// `Transport` is retryable for reads, and `Backend` carries a business
/// failure reported by one of the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Caller,
    Unauthenticated,
    Transport,
    Backend,
}

#[derive(Error, Debug)]
pub enum Error {
    /// A required operation variable was not supplied. Raised before any
    /// network call is made.
    #[error("missing required variable `{name}` for operation `{operation}`")]
    MissingVariable { operation: String, name: String },

    /// The call site passed input the access layer refuses to send
    /// (unknown variable, empty upload payload, dispatching a placeholder).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend rejected the request because it requires a privileged
    /// role and the identity context was anonymous.
    #[error("requires login: {0}")]
    RequiresLogin(String),

    /// The request could not complete (connect, timeout, malformed body).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A service reported a business failure. The message is the backend's
    /// own, passed through verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// The failure class callers branch on.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingVariable { .. } | Self::InvalidInput(_) => ErrorKind::Caller,
            Self::RequiresLogin(_) => ErrorKind::Unauthenticated,
            Self::Transport(_) | Self::Io(_) => ErrorKind::Transport,
            Self::Backend(_) | Self::Message(_) => ErrorKind::Backend,
        }
    }

    /// Whether repeating the same call without any change may succeed.
    ///
    /// Side-effecting callers must still check current state before
    /// re-issuing; this only says the failure was not the caller's fault.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

pub type MinabError = Error;
pub type Result<T> = std::result::Result<T, Error>;
