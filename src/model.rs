//! Persistent entities and request bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user owning a bookmark collection. Created out-of-band (seed data).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Account {
    pub id: i64,
    pub username: String,
}

/// A saved link. The owning account is never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Bookmark {
    pub id: i64,
    #[serde(skip)]
    pub account_id: i64,
    pub uri: String,
    pub description: String,
}

/// Body of `POST /bookmarks/:user_id`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewBookmark {
    pub uri: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_json_hides_owner() {
        let b = Bookmark {
            id: 1,
            account_id: 7,
            uri: "http://x.test".into(),
            description: "x".into(),
        };
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(
            v,
            serde_json::json!({ "id": 1, "uri": "http://x.test", "description": "x" })
        );
    }

    #[test]
    fn new_bookmark_ignores_unknown_fields() {
        let input: NewBookmark =
            serde_json::from_str(r#"{"uri":"http://y.test","description":"y","id":42}"#).unwrap();
        assert_eq!(input.uri, "http://y.test");
        assert_eq!(input.description, "y");
    }
}
