use std::collections::HashMap;

use {once_cell::sync::Lazy, serde_json::json};

use crate::{
    documents,
    operation::{Operation, OperationKind, VarSpec},
};

/// The closed set of named graph operations the application may issue.
///
/// Entries are fixed at build time; nothing here is derived from user input.
pub struct Catalog {
    ops: HashMap<&'static str, Operation>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

impl Catalog {
    /// The process-wide catalog instance.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    /// Look up an operation by name.
    pub fn lookup(&self, name: &str) -> Option<&Operation> {
        self.ops.get(name)
    }

    /// All registered operation names, for tooling.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.keys().copied()
    }

    fn build() -> Self {
        let entries = vec![
            Operation {
                name: "SearchEvent",
                kind: OperationKind::Query,
                document: documents::SEARCH_EVENT,
                variables: vec![
                    VarSpec::with_default("take", "Int", json!(10)),
                    VarSpec::with_default("text", "String", json!("%%")),
                ],
                dispatchable: true,
            },
            Operation {
                name: "GetEventById",
                kind: OperationKind::Query,
                document: documents::GET_EVENT_BY_ID,
                variables: vec![
                    VarSpec::required("id", "Int!"),
                    VarSpec::required("user_id", "Int!"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "GetMyEvents",
                kind: OperationKind::Query,
                document: documents::GET_MY_EVENTS,
                variables: vec![VarSpec::required("user_id", "Int!")],
                dispatchable: true,
            },
            Operation {
                name: "GetReservedEvents",
                kind: OperationKind::Query,
                document: documents::GET_RESERVED_EVENTS,
                variables: vec![VarSpec::required("user_id", "Int!")],
                dispatchable: true,
            },
            Operation {
                name: "GetBookmarks",
                kind: OperationKind::Query,
                document: documents::GET_BOOKMARKS,
                variables: vec![
                    VarSpec::required("user_id", "Int!"),
                    VarSpec::with_default("skip", "Int", json!(0)),
                    VarSpec::with_default("take", "Int", json!(6)),
                ],
                dispatchable: true,
            },
            Operation {
                name: "CreateEventAction",
                kind: OperationKind::Mutation,
                document: documents::CREATE_EVENT,
                variables: vec![
                    VarSpec::required("title", "String!"),
                    VarSpec::required("description", "String!"),
                    VarSpec::required("date", "String!"),
                    VarSpec::required("price", "Float!"),
                    VarSpec::required("location_lat", "Float!"),
                    VarSpec::required("location_lng", "Float!"),
                    VarSpec::required("venue_name", "String!"),
                    VarSpec::required("address", "String!"),
                    VarSpec::required("category_id", "Int!"),
                    VarSpec::required("tags", "[String!]!"),
                    VarSpec::required("image_urls", "[String!]!"),
                    VarSpec::required("featured_image", "String!"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "InsertTicket",
                kind: OperationKind::Mutation,
                document: documents::INSERT_TICKET,
                variables: vec![
                    VarSpec::required("event_id", "Int!"),
                    VarSpec::required("user_id", "Int!"),
                    VarSpec::required("ticket_number", "String!"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "SendComment",
                kind: OperationKind::Mutation,
                document: documents::SEND_COMMENT,
                variables: vec![
                    VarSpec::required("name", "String!"),
                    VarSpec::required("email", "String!"),
                    VarSpec::optional("message", "String"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "LoginUser",
                kind: OperationKind::Mutation,
                document: documents::LOGIN_USER,
                variables: vec![
                    VarSpec::required("email", "String!"),
                    VarSpec::required("password", "String!"),
                    VarSpec::required("remember_me", "Boolean!"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "SignupUser",
                kind: OperationKind::Mutation,
                document: documents::SIGNUP_USER,
                variables: vec![
                    VarSpec::required("first_name", "String!"),
                    VarSpec::required("last_name", "String!"),
                    VarSpec::required("email", "String!"),
                    VarSpec::required("phone_number", "String!"),
                    VarSpec::required("password", "String!"),
                    VarSpec::required("remember_me", "Boolean!"),
                ],
                dispatchable: true,
            },
            Operation {
                name: "BookmarkPlaceholder",
                kind: OperationKind::Query,
                document: documents::BOOKMARK_PLACEHOLDER,
                variables: vec![],
                dispatchable: false,
            },
            Operation {
                name: "UnbookmarkPlaceholder",
                kind: OperationKind::Query,
                document: documents::UNBOOKMARK_PLACEHOLDER,
                variables: vec![],
                dispatchable: false,
            },
        ];

        let ops = entries.into_iter().map(|op| (op.name, op)).collect();
        Self { ops }
    }
}
