//! HAL links and the URL templates used to build them.

mod resource;

pub use resource::{to_resource, BookmarkCollection, BookmarkResource, RootDocument};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Media type of successful responses.
pub const HAL_JSON: &str = "application/hal+json";

pub const REL_SELF: &str = "self";
pub const REL_BOOKMARKS: &str = "bookmarks";
pub const REL_BOOKMARK_URI: &str = "bookmark-uri";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Ordered link set. Serializes as a HAL `_links` object: `{"<rel>": {"href": "..."}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|l| l.rel == rel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Links(iter.into_iter().collect())
    }
}

#[derive(serde::Serialize)]
struct Href<'a> {
    href: &'a str,
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.rel, &Href { href: &link.href })?;
        }
        map.end()
    }
}

/// URL templates for the bookmark endpoints. Segments are percent-encoded; `base` is an optional
/// public origin (`http://host:port`) prefixed to every href.
#[derive(Clone, Debug, Default)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        LinkBuilder {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /bookmarks`
    pub fn root(&self) -> String {
        format!("{}/bookmarks", self.base)
    }

    /// `GET /bookmarks/{user_id}`
    pub fn collection(&self, user_id: &str) -> String {
        format!("{}/bookmarks/{}", self.base, encode_segment(user_id))
    }

    /// `GET /bookmarks/{user_id}/{bookmark_id}`
    pub fn bookmark(&self, user_id: &str, bookmark_id: i64) -> String {
        format!("{}/{}", self.collection(user_id), bookmark_id)
    }
}

/// Percent-encode one path segment. Dot-only segments are encoded too so clients
/// cannot collapse them as `.`/`..` during path normalization.
fn encode_segment(segment: &str) -> String {
    if !segment.is_empty() && segment.chars().all(|c| c == '.') {
        return segment.replace('.', "%2E");
    }
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "/bookmarks/alice", "/bookmarks/alice/1")]
    #[case("http://localhost:8080", "http://localhost:8080/bookmarks/alice", "http://localhost:8080/bookmarks/alice/1")]
    #[case("http://localhost:8080/", "http://localhost:8080/bookmarks/alice", "http://localhost:8080/bookmarks/alice/1")]
    fn builds_hrefs_from_templates(#[case] base: &str, #[case] collection: &str, #[case] item: &str) {
        let links = LinkBuilder::new(base);
        assert_eq!(links.collection("alice"), collection);
        assert_eq!(links.bookmark("alice", 1), item);
    }

    #[test]
    fn encodes_path_segments() {
        let links = LinkBuilder::default();
        assert_eq!(links.collection("a b/c"), "/bookmarks/a%20b%2Fc");
        assert_eq!(links.root(), "/bookmarks");
    }

    #[rstest]
    #[case(".", "/bookmarks/%2E/1")]
    #[case("..", "/bookmarks/%2E%2E/1")]
    #[case("a..b", "/bookmarks/a..b/1")]
    fn dot_segments_cannot_escape_the_collection(#[case] user: &str, #[case] expected: &str) {
        assert_eq!(LinkBuilder::default().bookmark(user, 1), expected);
    }

    #[test]
    fn links_serialize_keyed_by_rel_in_order() {
        let links: Links = vec![
            Link::new(REL_BOOKMARK_URI, "http://x.test"),
            Link::new(REL_SELF, "/bookmarks/alice/1"),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            r#"{"bookmark-uri":{"href":"http://x.test"},"self":{"href":"/bookmarks/alice/1"}}"#
        );
        assert_eq!(links.get(REL_SELF).map(|l| l.href.as_str()), Some("/bookmarks/alice/1"));
    }
}
