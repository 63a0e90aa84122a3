use std::sync::Arc;

use {
    minab_auth::{Credential, CredentialStore, RequestSigner},
    minab_catalog::types::{
        CreateEventData, CreatedEvent, EventDetail, GetBookmarksData, GetEventByIdData,
        GetMyEventsData, GetReservedEventsData, InsertTicketData, InsertedTicket, LoginData,
        SearchEventData, SendCommentData, SignupData, Ticket,
    },
    minab_common::{Error, Result},
    minab_config::MinabConfig,
    minab_transport::{ActionClient, ActionExecutor, GraphClient, GraphExecutor, PaymentSession, UploadedFile},
    serde::{Deserialize, Serialize},
    serde_json::{Value, json},
    tracing::{debug, info},
};

use crate::action::{Action, CreateEventInput, Delegated, Route, route};

/// Session facts returned from login/signup. The token itself never leaves
/// the access layer; it goes straight into the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Routes each logical action to the graph backend or the secondary service
/// and presents one uniform result contract either way.
///
/// The router never auto-retries anything with a side effect. Reads are safe
/// for callers to repeat on `Transport` failures; the bookmark toggle
/// re-checks current state on every invocation, so re-dispatching it after an
/// ambiguous failure cannot double-write.
pub struct Router {
    graph: Arc<dyn GraphExecutor>,
    actions: Arc<dyn ActionExecutor>,
    credentials: Arc<dyn CredentialStore>,
}

impl Router {
    pub fn new(
        graph: Arc<dyn GraphExecutor>,
        actions: Arc<dyn ActionExecutor>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            graph,
            actions,
            credentials,
        }
    }

    /// Wire up real transports from resolved configuration.
    pub fn from_config(
        config: &MinabConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let signer = RequestSigner::new(credentials.clone());
        let graph = GraphClient::new(&config.graphql_endpoint, signer.clone())?;
        let actions = ActionClient::new(&config.api_base, signer)?;
        Ok(Self::new(Arc::new(graph), Arc::new(actions), credentials))
    }

    /// Dispatch a logical action along its declared route.
    ///
    /// On success the returned value carries the identifying fields of the
    /// affected entity; for a given action the shape does not depend on which
    /// backend served it.
    pub async fn dispatch(&self, action: Action) -> Result<Value> {
        match route(&action) {
            Route::Graph(operation) => {
                let variables = graph_variables(&action);
                let data = self.graph.execute(operation, variables).await?;
                self.after_graph(&action, data)
            },
            Route::Delegated(delegated) => self.dispatch_delegated(delegated, &action).await,
            Route::Local => {
                self.credentials.clear()?;
                info!("session cleared");
                Ok(json!({ "logged_out": true }))
            },
        }
    }

    async fn dispatch_delegated(&self, delegated: Delegated, action: &Action) -> Result<Value> {
        match (delegated, action) {
            (Delegated::AddBookmark, Action::AddBookmark { event_id }) => {
                let receipt = self.actions.bookmark(*event_id).await?;
                Ok(json!({ "event_id": receipt.event_id, "bookmarked": true }))
            },
            (Delegated::RemoveBookmark, Action::RemoveBookmark { event_id }) => {
                self.actions.unbookmark(*event_id).await?;
                Ok(json!({ "event_id": event_id, "bookmarked": false }))
            },
            (Delegated::ToggleBookmark, Action::ToggleBookmark { event_id, user_id }) => {
                let bookmarked = Box::pin(self.toggle_bookmark(*event_id, *user_id)).await?;
                Ok(json!({ "event_id": event_id, "bookmarked": bookmarked }))
            },
            (
                Delegated::InitializePayment,
                Action::InitializePayment {
                    event_id,
                    full_name,
                    email,
                },
            ) => {
                let session = self
                    .actions
                    .initialize_payment(*event_id, full_name, email)
                    .await?;
                to_outcome(&session)
            },
            (Delegated::UploadFile, Action::UploadFile { name, base64 }) => {
                let uploaded = self.actions.upload(name, base64).await?;
                to_outcome(&uploaded)
            },
            // route() pairs every delegated action with its own variant.
            _ => Err(Error::invalid_input("action does not match its route")),
        }
    }

    fn after_graph(&self, action: &Action, data: Value) -> Result<Value> {
        match action {
            Action::Login { .. } => {
                let parsed: LoginData = from_data("LoginUser", data)?;
                self.establish_session(parsed.login.token, parsed.login.user_id, parsed.login.message)
            },
            Action::Signup { .. } => {
                let parsed: SignupData = from_data("SignupUser", data)?;
                self.establish_session(
                    parsed.signup.token,
                    parsed.signup.user_id,
                    parsed.signup.message,
                )
            },
            _ => Ok(data),
        }
    }

    /// Persist a fresh session token and report the session facts.
    ///
    /// A response without a usable token is a backend-reported failure; the
    /// stored credential is left untouched in that case.
    fn establish_session(
        &self,
        token: Option<String>,
        user_id: Option<i64>,
        message: Option<String>,
    ) -> Result<Value> {
        let credential = token.as_deref().and_then(Credential::parse);
        match credential {
            Some(credential) => {
                self.credentials.set(credential)?;
                info!(user_id, "session established");
                to_outcome(&SessionInfo { user_id, message })
            },
            None => Err(Error::Backend(
                message.unwrap_or_else(|| "authentication failed".to_string()),
            )),
        }
    }

    // ── Typed convenience surface ───────────────────────────────────────────

    pub async fn search_events(
        &self,
        take: Option<i64>,
        text: Option<String>,
    ) -> Result<SearchEventData> {
        let data = self.dispatch(Action::SearchEvents { take, text }).await?;
        from_data("SearchEvent", data)
    }

    pub async fn event(&self, id: i64, user_id: i64) -> Result<Option<EventDetail>> {
        let data = self.dispatch(Action::GetEvent { id, user_id }).await?;
        let parsed: GetEventByIdData = from_data("GetEventById", data)?;
        Ok(parsed.events_by_pk)
    }

    pub async fn my_events(&self, user_id: i64) -> Result<GetMyEventsData> {
        let data = self.dispatch(Action::MyEvents { user_id }).await?;
        from_data("GetMyEvents", data)
    }

    pub async fn reserved_events(&self, user_id: i64) -> Result<Vec<Ticket>> {
        let data = self.dispatch(Action::ReservedEvents { user_id }).await?;
        let parsed: GetReservedEventsData = from_data("GetReservedEvents", data)?;
        Ok(parsed.tickets)
    }

    pub async fn bookmark_page(
        &self,
        user_id: i64,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<GetBookmarksData> {
        let data = self
            .dispatch(Action::BookmarkPage {
                user_id,
                skip,
                take,
            })
            .await?;
        from_data("GetBookmarks", data)
    }

    /// Whether the user currently has the event bookmarked.
    pub async fn bookmark_state(&self, event_id: i64, user_id: i64) -> Result<bool> {
        let detail = self.event(event_id, user_id).await?;
        match detail {
            Some(detail) => Ok(detail.is_bookmarked()),
            None => Err(Error::Backend(format!("event {event_id} not found"))),
        }
    }

    /// Flip the bookmark for `(event_id, user_id)` and return the new state.
    ///
    /// Current state is resolved first and the matching add/remove issued, so
    /// invoking this twice in quick succession lands on a well-defined state
    /// instead of duplicating rows. On an ambiguous failure (e.g. timeout)
    /// the error is surfaced as-is; re-dispatching re-checks state rather
    /// than blindly repeating the last write.
    pub async fn toggle_bookmark(&self, event_id: i64, user_id: i64) -> Result<bool> {
        let bookmarked = self.bookmark_state(event_id, user_id).await?;
        debug!(event_id, user_id, bookmarked, "toggling bookmark");
        if bookmarked {
            self.actions.unbookmark(event_id).await?;
            Ok(false)
        } else {
            self.actions.bookmark(event_id).await?;
            Ok(true)
        }
    }

    pub async fn create_event(&self, input: CreateEventInput) -> Result<CreatedEvent> {
        let data = self.dispatch(Action::CreateEvent(input)).await?;
        let parsed: CreateEventData = from_data("CreateEventAction", data)?;
        Ok(parsed.create_event)
    }

    pub async fn issue_ticket(
        &self,
        event_id: i64,
        user_id: i64,
        ticket_number: String,
    ) -> Result<InsertedTicket> {
        let data = self
            .dispatch(Action::IssueTicket {
                event_id,
                user_id,
                ticket_number,
            })
            .await?;
        let parsed: InsertTicketData = from_data("InsertTicket", data)?;
        Ok(parsed.insert_tickets_one)
    }

    /// Returns the number of comment rows inserted.
    pub async fn send_comment(
        &self,
        name: String,
        email: String,
        message: Option<String>,
    ) -> Result<i64> {
        let data = self
            .dispatch(Action::SendComment {
                name,
                email,
                message,
            })
            .await?;
        let parsed: SendCommentData = from_data("SendComment", data)?;
        Ok(parsed.insert_comments.affected_rows)
    }

    pub async fn initialize_payment(
        &self,
        event_id: i64,
        full_name: &str,
        email: &str,
    ) -> Result<PaymentSession> {
        self.actions
            .initialize_payment(event_id, full_name, email)
            .await
    }

    pub async fn upload(&self, name: &str, base64_payload: &str) -> Result<UploadedFile> {
        self.actions.upload(name, base64_payload).await
    }

    /// Log in and persist the session credential.
    pub async fn login(
        &self,
        email: String,
        password: String,
        remember_me: bool,
    ) -> Result<SessionInfo> {
        let data = self
            .dispatch(Action::Login {
                email,
                password,
                remember_me,
            })
            .await?;
        from_data("login", data)
    }

    /// Clear the session credential.
    pub async fn logout(&self) -> Result<()> {
        self.dispatch(Action::Logout).await.map(|_| ())
    }
}

/// Build the variables object for a graph-routed action. Optional fields are
/// omitted so catalog defaults apply.
fn graph_variables(action: &Action) -> Value {
    match action {
        Action::SearchEvents { take, text } => {
            let mut vars = serde_json::Map::new();
            if let Some(take) = take {
                vars.insert("take".into(), json!(take));
            }
            if let Some(text) = text {
                vars.insert("text".into(), json!(text));
            }
            Value::Object(vars)
        },
        Action::GetEvent { id, user_id } => json!({ "id": id, "user_id": user_id }),
        Action::MyEvents { user_id } | Action::ReservedEvents { user_id } => {
            json!({ "user_id": user_id })
        },
        Action::BookmarkPage {
            user_id,
            skip,
            take,
        } => {
            let mut vars = serde_json::Map::new();
            vars.insert("user_id".into(), json!(user_id));
            if let Some(skip) = skip {
                vars.insert("skip".into(), json!(skip));
            }
            if let Some(take) = take {
                vars.insert("take".into(), json!(take));
            }
            Value::Object(vars)
        },
        Action::CreateEvent(input) => serde_json::to_value(input).unwrap_or(Value::Null),
        Action::IssueTicket {
            event_id,
            user_id,
            ticket_number,
        } => json!({
            "event_id": event_id,
            "user_id": user_id,
            "ticket_number": ticket_number,
        }),
        Action::SendComment {
            name,
            email,
            message,
        } => {
            let mut vars = serde_json::Map::new();
            vars.insert("name".into(), json!(name));
            vars.insert("email".into(), json!(email));
            if let Some(message) = message {
                vars.insert("message".into(), json!(message));
            }
            Value::Object(vars)
        },
        Action::Login {
            email,
            password,
            remember_me,
        } => json!({
            "email": email,
            "password": password,
            "remember_me": remember_me,
        }),
        Action::Signup {
            first_name,
            last_name,
            email,
            phone_number,
            password,
            remember_me,
        } => json!({
            "first_name": first_name,
            "last_name": last_name,
            "email": email,
            "phone_number": phone_number,
            "password": password,
            "remember_me": remember_me,
        }),
        // Delegated and local actions carry no graph variables.
        _ => Value::Object(serde_json::Map::new()),
    }
}

fn from_data<T: serde::de::DeserializeOwned>(operation: &str, data: Value) -> Result<T> {
    serde_json::from_value(data)
        .map_err(|e| Error::Transport(format!("unexpected `{operation}` data shape: {e}")))
}

fn to_outcome<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::message(format!("serialize outcome: {e}")))
}
