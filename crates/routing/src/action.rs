use serde::Serialize;

/// Input for event creation; mirrors the `CreateEventAction` variables.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEventInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub price: f64,
    pub location_lat: f64,
    pub location_lng: f64,
    pub venue_name: String,
    pub address: String,
    pub category_id: i64,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub featured_image: String,
}

/// A logical user action. Each maps to exactly one graph operation or one
/// delegated action — see [`route`].
#[derive(Debug, Clone)]
pub enum Action {
    SearchEvents {
        take: Option<i64>,
        text: Option<String>,
    },
    GetEvent {
        id: i64,
        user_id: i64,
    },
    MyEvents {
        user_id: i64,
    },
    ReservedEvents {
        user_id: i64,
    },
    BookmarkPage {
        user_id: i64,
        skip: Option<i64>,
        take: Option<i64>,
    },
    CreateEvent(CreateEventInput),
    IssueTicket {
        event_id: i64,
        user_id: i64,
        ticket_number: String,
    },
    SendComment {
        name: String,
        email: String,
        message: Option<String>,
    },
    Login {
        email: String,
        password: String,
        remember_me: bool,
    },
    Signup {
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
        password: String,
        remember_me: bool,
    },
    Logout,
    AddBookmark {
        event_id: i64,
    },
    RemoveBookmark {
        event_id: i64,
    },
    ToggleBookmark {
        event_id: i64,
        user_id: i64,
    },
    InitializePayment {
        event_id: i64,
        full_name: String,
        email: String,
    },
    UploadFile {
        name: String,
        base64: String,
    },
}

/// Which delegated (secondary-service) call serves an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delegated {
    AddBookmark,
    RemoveBookmark,
    /// Composite: resolves current state via the graph, then adds or removes.
    ToggleBookmark,
    InitializePayment,
    UploadFile,
}

/// Where an action is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A catalog operation against the graph backend, by name.
    Graph(&'static str),
    /// A side-effecting call to the secondary service.
    Delegated(Delegated),
    /// Served entirely by the credential store; no network.
    Local,
}

/// The routing table: one declarative entry per logical action.
///
/// Reads and pure data writes go to the graph backend; anything that
/// coordinates an external side effect (payment gateway, object storage,
/// audited bookmark writes) is delegated to the secondary service. Adding an
/// action means adding one arm here, not a call-site decision somewhere else.
pub fn route(action: &Action) -> Route {
    match action {
        Action::SearchEvents { .. } => Route::Graph("SearchEvent"),
        Action::GetEvent { .. } => Route::Graph("GetEventById"),
        Action::MyEvents { .. } => Route::Graph("GetMyEvents"),
        Action::ReservedEvents { .. } => Route::Graph("GetReservedEvents"),
        Action::BookmarkPage { .. } => Route::Graph("GetBookmarks"),
        Action::CreateEvent(_) => Route::Graph("CreateEventAction"),
        // Pure relational write, no external side effect.
        Action::IssueTicket { .. } => Route::Graph("InsertTicket"),
        Action::SendComment { .. } => Route::Graph("SendComment"),
        Action::Login { .. } => Route::Graph("LoginUser"),
        Action::Signup { .. } => Route::Graph("SignupUser"),
        Action::Logout => Route::Local,
        Action::AddBookmark { .. } => Route::Delegated(Delegated::AddBookmark),
        Action::RemoveBookmark { .. } => Route::Delegated(Delegated::RemoveBookmark),
        Action::ToggleBookmark { .. } => Route::Delegated(Delegated::ToggleBookmark),
        Action::InitializePayment { .. } => Route::Delegated(Delegated::InitializePayment),
        Action::UploadFile { .. } => Route::Delegated(Delegated::UploadFile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_pure_writes_go_to_the_graph() {
        assert_eq!(
            route(&Action::SearchEvents {
                take: None,
                text: None
            }),
            Route::Graph("SearchEvent")
        );
        assert_eq!(
            route(&Action::BookmarkPage {
                user_id: 1,
                skip: None,
                take: None
            }),
            Route::Graph("GetBookmarks")
        );
        assert_eq!(
            route(&Action::IssueTicket {
                event_id: 1,
                user_id: 2,
                ticket_number: "T-1".into()
            }),
            Route::Graph("InsertTicket")
        );
    }

    #[test]
    fn side_effecting_actions_are_delegated() {
        assert_eq!(
            route(&Action::ToggleBookmark {
                event_id: 1,
                user_id: 2
            }),
            Route::Delegated(Delegated::ToggleBookmark)
        );
        assert_eq!(
            route(&Action::InitializePayment {
                event_id: 1,
                full_name: "A".into(),
                email: "a@example.com".into()
            }),
            Route::Delegated(Delegated::InitializePayment)
        );
        assert_eq!(
            route(&Action::UploadFile {
                name: "a.png".into(),
                base64: "aGk=".into()
            }),
            Route::Delegated(Delegated::UploadFile)
        );
    }

    #[test]
    fn every_graph_route_resolves_in_the_catalog_as_dispatchable() {
        let actions = [
            Action::SearchEvents {
                take: None,
                text: None,
            },
            Action::GetEvent { id: 1, user_id: 1 },
            Action::MyEvents { user_id: 1 },
            Action::ReservedEvents { user_id: 1 },
            Action::BookmarkPage {
                user_id: 1,
                skip: None,
                take: None,
            },
            Action::IssueTicket {
                event_id: 1,
                user_id: 1,
                ticket_number: "T-1".into(),
            },
            Action::SendComment {
                name: "A".into(),
                email: "a@example.com".into(),
                message: None,
            },
            Action::Login {
                email: "a@example.com".into(),
                password: "pw".into(),
                remember_me: false,
            },
        ];
        for action in actions {
            if let Route::Graph(name) = route(&action) {
                let op = minab_catalog::Catalog::global().lookup(name).unwrap();
                assert!(op.dispatchable, "`{name}` must be dispatchable");
            }
        }
    }
}
