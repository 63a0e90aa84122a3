use {
    minab_auth::RequestSigner,
    minab_catalog::Catalog,
    minab_common::{Error, Result},
    reqwest::header::AUTHORIZATION,
    serde::{Deserialize, Serialize},
    serde_json::Value,
    tracing::{debug, warn},
    url::Url,
};

use crate::GraphExecutor;

/// Hasura error codes that mean "this needs a privileged role".
const UNAUTHENTICATED_CODES: &[&str] = &["access-denied", "invalid-jwt", "invalid-headers"];

/// GraphQL-over-HTTP client for the graph backend.
///
/// Every request is signed immediately before transmission: the signer is
/// consulted per call, so a credential change applies to the very next
/// request. When the identity is anonymous the authorization header is
/// omitted entirely and the backend falls back to its unauthenticated role.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    endpoint: Url,
    signer: RequestSigner,
}

#[derive(Serialize)]
struct GraphRequest<'a> {
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphError>,
}

#[derive(Deserialize)]
struct GraphError {
    message: String,
    #[serde(default)]
    extensions: GraphErrorExtensions,
}

#[derive(Deserialize, Default)]
struct GraphErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

impl GraphClient {
    pub fn new(endpoint: &str, signer: RequestSigner) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::invalid_input(format!("invalid graph endpoint: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            signer,
        })
    }

    /// Execute a catalog operation by name.
    ///
    /// Validation (catalog lookup, dispatchability, required variables)
    /// happens before any network activity. Returns the `data` payload on
    /// success.
    pub async fn execute(&self, operation: &str, variables: Value) -> Result<Value> {
        let op = Catalog::global().lookup(operation).ok_or_else(|| {
            Error::invalid_input(format!("unknown operation `{operation}`"))
        })?;
        if !op.dispatchable {
            return Err(Error::invalid_input(format!(
                "operation `{operation}` is a placeholder; its action is served by the secondary service"
            )));
        }
        let variables = op.build_variables(variables)?;

        let body = GraphRequest {
            operation_name: op.name,
            query: op.document,
            variables: Value::Object(variables),
        };

        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(auth) = self.signer.authorization() {
            request = request.header(AUTHORIZATION, auth);
        }

        debug!(operation = op.name, "graph request");
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation = op.name, status = %status, "graph request failed");
            return Err(Error::Transport(format!(
                "graph backend returned {status}"
            )));
        }

        let parsed: GraphResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed graph response: {e}")))?;

        if let Some(first) = parsed.errors.first() {
            return Err(map_graph_error(first));
        }

        parsed
            .data
            .ok_or_else(|| Error::Transport("graph response carried no data".to_string()))
    }

    /// Execute and deserialize `data` into a typed response shape.
    pub async fn execute_as<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        variables: Value,
    ) -> Result<T> {
        let data = self.execute(operation, variables).await?;
        serde_json::from_value(data)
            .map_err(|e| Error::Transport(format!("unexpected `{operation}` data shape: {e}")))
    }
}

fn map_graph_error(err: &GraphError) -> Error {
    match err.extensions.code.as_deref() {
        Some(code) if UNAUTHENTICATED_CODES.contains(&code) => {
            Error::RequiresLogin(err.message.clone())
        },
        // Business failure; pass the backend's message through verbatim.
        _ => Error::Backend(err.message.clone()),
    }
}

#[async_trait::async_trait]
impl GraphExecutor for GraphClient {
    async fn execute(&self, operation: &str, variables: Value) -> Result<Value> {
        GraphClient::execute(self, operation, variables).await
    }
}
