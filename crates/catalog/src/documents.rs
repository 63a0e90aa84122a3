//! The GraphQL documents sent on the wire, one per catalog entry.

pub const SEARCH_EVENT: &str = r#"
query SearchEvent($take: Int = 10, $text: String = "%%") {
  events(where: { title: { _ilike: $text } }, limit: $take, order_by: { created_at: desc }) {
    id
    title
    featured_image
    event_date
    venue_name
    price
    category {
      name
    }
  }
}
"#;

pub const GET_EVENT_BY_ID: &str = r#"
query GetEventById($id: Int!, $user_id: Int!) {
  events_by_pk(id: $id) {
    id
    title
    description
    featured_image
    event_date
    price
    venue_name
    address
    images {
      image_url
    }
    event_tags {
      tag_name
    }
    category {
      name
    }
    event_bookmarks(where: { user_id: { _eq: $user_id } }) {
      user_id
    }
  }
}
"#;

pub const GET_MY_EVENTS: &str = r#"
query GetMyEvents($user_id: Int!) {
  events(where: { user_id: { _eq: $user_id } }, order_by: { created_at: desc }) {
    id
    title
    featured_image
    event_date
    venue_name
    category {
      name
    }
  }
  events_aggregate(where: { user_id: { _eq: $user_id } }) {
    aggregate {
      count
    }
  }
}
"#;

pub const GET_RESERVED_EVENTS: &str = r#"
query GetReservedEvents($user_id: Int!) {
  tickets(where: { user_id: { _eq: $user_id } }) {
    id
    ticket_number
    status
    event {
      id
      title
      featured_image
      event_date
      venue_name
      category {
        name
      }
    }
  }
}
"#;

pub const GET_BOOKMARKS: &str = r#"
query GetBookmarks($user_id: Int!, $skip: Int = 0, $take: Int = 6) {
  event_bookmarks_aggregate(where: { user_id: { _eq: $user_id } }) {
    aggregate {
      count
    }
  }
  event_bookmarks(where: { user_id: { _eq: $user_id } }, offset: $skip, limit: $take) {
    event {
      id
      title
      featured_image
      event_date
      venue_name
      category {
        name
      }
    }
  }
}
"#;

pub const CREATE_EVENT: &str = r#"
mutation CreateEventAction($title: String!, $description: String!, $date: String!, $price: Float!, $location_lat: Float!, $location_lng: Float!, $venue_name: String!, $address: String!, $category_id: Int!, $tags: [String!]!, $image_urls: [String!]!, $featured_image: String!) {
  createEvent(title: $title, description: $description, date: $date, price: $price, location_lat: $location_lat, location_lng: $location_lng, venue_name: $venue_name, address: $address, category_id: $category_id, tags: $tags, image_urls: $image_urls, featured_image: $featured_image) {
    id
    message
  }
}
"#;

pub const INSERT_TICKET: &str = r#"
mutation InsertTicket($event_id: Int!, $user_id: Int!, $ticket_number: String!) {
  insert_tickets_one(object: { event_id: $event_id, user_id: $user_id, status: "booked", ticket_number: $ticket_number }) {
    id
  }
}
"#;

pub const SEND_COMMENT: &str = r#"
mutation SendComment($name: String!, $email: String!, $message: String) {
  insert_comments(objects: { name: $name, email: $email, message: $message }) {
    affected_rows
  }
}
"#;

pub const LOGIN_USER: &str = r#"
mutation LoginUser($email: String!, $password: String!, $remember_me: Boolean!) {
  login(email: $email, password: $password, remember_me: $remember_me) {
    token
    user_id
    message
  }
}
"#;

pub const SIGNUP_USER: &str = r#"
mutation SignupUser($first_name: String!, $last_name: String!, $email: String!, $phone_number: String!, $password: String!, $remember_me: Boolean!) {
  signup(first_name: $first_name, last_name: $last_name, email: $email, phone_number: $phone_number, password: $password, remember_me: $remember_me) {
    token
    user_id
    message
  }
}
"#;

// Bookmark writes go through the secondary service, not the graph backend.
// These stay registered as syntactically valid no-ops so references to the
// names keep resolving; the graph transport refuses to send them.
pub const BOOKMARK_PLACEHOLDER: &str = "query BookmarkPlaceholder { __typename }";
pub const UNBOOKMARK_PLACEHOLDER: &str = "query UnbookmarkPlaceholder { __typename }";
