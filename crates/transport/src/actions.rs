use {
    base64::Engine,
    minab_auth::RequestSigner,
    minab_common::{Error, Result},
    reqwest::header::AUTHORIZATION,
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
    url::Url,
};

use crate::ActionExecutor;

/// REST client for the secondary service.
///
/// Carries the actions that cannot ride the graph transport because they
/// coordinate side effects outside the relational store: bookmark writes
/// (idempotency and audit live server-side), payment initialization (external
/// gateway), and file upload (object storage). Requests are signed the same
/// way graph requests are.
#[derive(Clone)]
pub struct ActionClient {
    http: reqwest::Client,
    base: Url,
    signer: RequestSigner,
}

/// Receipt for a bookmark write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkReceipt {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
}

/// Result of payment initialization: where to send the user next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub checkout_url: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a file upload: where the bytes can be retrieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

#[derive(Serialize)]
struct BookmarkRequest {
    event_id: i64,
}

/// Action-handler envelope: the service binds its input nested under `input`.
#[derive(Serialize)]
struct ActionEnvelope<T: Serialize> {
    input: T,
}

#[derive(Serialize)]
struct PaymentInput<'a> {
    event_id: i64,
    full_name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct UploadInput<'a> {
    name: &'a str,
    base64: &'a str,
}

/// Error body the service returns on failures: `{"message": "..."}`.
#[derive(Deserialize)]
struct ServiceMessage {
    #[serde(default)]
    message: Option<String>,
}

impl ActionClient {
    pub fn new(base: &str, signer: RequestSigner) -> Result<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| Error::invalid_input(format!("invalid service base URL: {e}")))?;
        // Url::join drops the last segment of a slashless path.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            signer,
        })
    }

    /// Add a bookmark for the current user.
    pub async fn bookmark(&self, event_id: i64) -> Result<BookmarkReceipt> {
        self.post("bookmark", &BookmarkRequest { event_id }).await
    }

    /// Remove the current user's bookmark. Removing an absent bookmark is not
    /// an error — the service answers with the same "removed" message.
    pub async fn unbookmark(&self, event_id: i64) -> Result<()> {
        let _: ServiceMessage = self.post("unbookmark", &BookmarkRequest { event_id }).await?;
        Ok(())
    }

    /// Initialize a payment and obtain the gateway redirect target.
    ///
    /// A gateway rejection comes back as a `Backend` failure carrying the
    /// service's message.
    pub async fn initialize_payment(
        &self,
        event_id: i64,
        full_name: &str,
        email: &str,
    ) -> Result<PaymentSession> {
        let session: PaymentSession = self
            .post(
                "initialize-payment",
                &ActionEnvelope {
                    input: PaymentInput {
                        event_id,
                        full_name,
                        email,
                    },
                },
            )
            .await?;

        if session.status != "success" {
            let message = session
                .message
                .unwrap_or_else(|| format!("payment initialization {}", session.status));
            return Err(Error::Backend(message));
        }
        if session.checkout_url.is_empty() {
            return Err(Error::Backend(
                "payment gateway returned no checkout URL".to_string(),
            ));
        }
        Ok(session)
    }

    /// Upload a base64-encoded file and obtain its retrievable URL.
    ///
    /// The payload is checked in-process first: an empty or undecodable body
    /// is a caller error and never reaches the wire.
    pub async fn upload(&self, name: &str, base64_payload: &str) -> Result<UploadedFile> {
        if name.trim().is_empty() {
            return Err(Error::invalid_input("upload name must not be empty"));
        }
        if base64_payload.is_empty() {
            return Err(Error::invalid_input("upload payload must not be empty"));
        }
        base64::engine::general_purpose::STANDARD
            .decode(base64_payload)
            .map_err(|e| Error::invalid_input(format!("upload payload is not valid base64: {e}")))?;

        self.post(
            "upload",
            &ActionEnvelope {
                input: UploadInput {
                    name,
                    base64: base64_payload,
                },
            },
        )
        .await
    }

    async fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self
            .base
            .join(path)
            .map_err(|e| Error::invalid_input(format!("invalid action path `{path}`: {e}")))?;

        let mut request = self.http.post(url).json(body);
        if let Some(auth) = self.signer.authorization() {
            request = request.header(AUTHORIZATION, auth);
        }

        debug!(action = path, "secondary-service request");
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = service_message(response)
                .await
                .unwrap_or_else(|| "authorization required".to_string());
            return Err(Error::RequiresLogin(message));
        }
        if !status.is_success() {
            warn!(action = path, status = %status, "secondary-service request failed");
            return Err(match service_message(response).await {
                Some(message) => Error::Backend(message),
                // No service-authored message means the service itself never
                // answered; a gateway 5xx is retryable, a bare 4xx is not.
                None if status.is_server_error() => {
                    Error::Transport(format!("secondary service returned {status}"))
                },
                None => Error::Backend(format!("secondary service returned {status}")),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed `{path}` response: {e}")))
    }
}

/// The service's own message from an error body, when the body carries one.
async fn service_message(response: reqwest::Response) -> Option<String> {
    response.json::<ServiceMessage>().await.ok()?.message
}

#[async_trait::async_trait]
impl ActionExecutor for ActionClient {
    async fn bookmark(&self, event_id: i64) -> Result<BookmarkReceipt> {
        ActionClient::bookmark(self, event_id).await
    }

    async fn unbookmark(&self, event_id: i64) -> Result<()> {
        ActionClient::unbookmark(self, event_id).await
    }

    async fn initialize_payment(
        &self,
        event_id: i64,
        full_name: &str,
        email: &str,
    ) -> Result<PaymentSession> {
        ActionClient::initialize_payment(self, event_id, full_name, email).await
    }

    async fn upload(&self, name: &str, base64_payload: &str) -> Result<UploadedFile> {
        ActionClient::upload(self, name, base64_payload).await
    }
}
