//! Typed response shapes for the declared field selections.
//!
//! One `*Data` struct per operation, mirroring the Hasura top-level keys, plus
//! the nested entity types they share. Fields the documents select but screens
//! may not use are still modeled; anything else is rejected by serde.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub name: String,
}

/// Event fields shared by the list-style selections.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventImage {
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventTag {
    pub tag_name: String,
}

/// The per-user bookmark marker selected by `GetEventById`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkMarker {
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub images: Vec<EventImage>,
    #[serde(default)]
    pub event_tags: Vec<EventTag>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Non-empty iff the requesting user has bookmarked this event.
    #[serde(default)]
    pub event_bookmarks: Vec<BookmarkMarker>,
}

impl EventDetail {
    pub fn is_bookmarked(&self) -> bool {
        !self.event_bookmarks.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_number: String,
    pub status: String,
    pub event: EventSummary,
}

/// Hasura aggregate envelope: `{ "aggregate": { "count": n } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Aggregate {
    pub aggregate: AggregateCount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregateCount {
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkEntry {
    pub event: EventSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AffectedRows {
    pub affected_rows: i64,
}

/// Result of the `login`/`signup` actions; the token feeds the credential
/// store.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: Option<String>,
    pub user_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Per-operation top-level shapes ──────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEventData {
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetEventByIdData {
    pub events_by_pk: Option<EventDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetMyEventsData {
    pub events: Vec<EventSummary>,
    pub events_aggregate: Aggregate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetReservedEventsData {
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetBookmarksData {
    pub event_bookmarks_aggregate: Aggregate,
    pub event_bookmarks: Vec<BookmarkEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEvent {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventData {
    #[serde(rename = "createEvent")]
    pub create_event: CreatedEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertedTicket {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertTicketData {
    pub insert_tickets_one: InsertedTicket,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendCommentData {
    pub insert_comments: AffectedRows,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub login: AuthSession,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupData {
    pub signup: AuthSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_page_parses_with_aggregate() {
        let data: GetBookmarksData = serde_json::from_value(serde_json::json!({
            "event_bookmarks_aggregate": { "aggregate": { "count": 10 } },
            "event_bookmarks": [
                { "event": { "id": 1, "title": "Jazz Night", "category": { "name": "Music" } } }
            ]
        }))
        .unwrap();
        assert_eq!(data.event_bookmarks_aggregate.aggregate.count, 10);
        assert_eq!(data.event_bookmarks.len(), 1);
        assert_eq!(data.event_bookmarks[0].event.title, "Jazz Night");
    }

    #[test]
    fn event_detail_bookmark_marker() {
        let detail: EventDetail = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Art Expo",
            "description": "Open gallery",
            "event_bookmarks": [{ "user_id": 9 }]
        }))
        .unwrap();
        assert!(detail.is_bookmarked());

        let detail: EventDetail = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Art Expo",
            "description": "Open gallery",
            "event_bookmarks": []
        }))
        .unwrap();
        assert!(!detail.is_bookmarked());
    }

    #[test]
    fn missing_event_is_none() {
        let data: GetEventByIdData =
            serde_json::from_value(serde_json::json!({ "events_by_pk": null })).unwrap();
        assert!(data.events_by_pk.is_none());
    }
}
