//! Response-time representations: bookmark resources, the per-user collection and the root document.

use super::{Link, LinkBuilder, Links, REL_BOOKMARKS, REL_BOOKMARK_URI, REL_SELF};
use crate::model::{Account, Bookmark};
use serde::Serialize;
use utoipa::ToSchema;

/// A bookmark with its `bookmark-uri`, `bookmarks` and `self` links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookmarkResource {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl BookmarkResource {
    pub fn self_href(&self) -> Option<&str> {
        self.links.get(REL_SELF).map(|l| l.href.as_str())
    }
}

/// Wrap `bookmark` in its links, addressed under `user_id`.
pub fn to_resource(links: &LinkBuilder, bookmark: Bookmark, user_id: &str) -> BookmarkResource {
    let rels = [
        Link::new(REL_BOOKMARK_URI, bookmark.uri.clone()),
        Link::new(REL_BOOKMARKS, links.collection(user_id)),
        Link::new(REL_SELF, links.bookmark(user_id, bookmark.id)),
    ];
    BookmarkResource {
        bookmark,
        links: rels.into_iter().collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Embedded {
    pub bookmarks: Vec<BookmarkResource>,
}

/// `GET /bookmarks/{user_id}` body. `_embedded` is omitted when the user has no bookmarks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookmarkCollection {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl BookmarkCollection {
    pub fn new(links: &LinkBuilder, user_id: &str, bookmarks: Vec<BookmarkResource>) -> Self {
        let embedded = (!bookmarks.is_empty()).then_some(Embedded { bookmarks });
        BookmarkCollection {
            embedded,
            links: std::iter::once(Link::new(REL_SELF, links.collection(user_id))).collect(),
        }
    }

    pub fn bookmarks(&self) -> &[BookmarkResource] {
        self.embedded.as_ref().map(|e| e.bookmarks.as_slice()).unwrap_or(&[])
    }
}

/// `GET /bookmarks` body: one link per account, rel = username.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RootDocument {
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl RootDocument {
    pub fn new(links: &LinkBuilder, accounts: &[Account]) -> Self {
        RootDocument {
            links: accounts
                .iter()
                .map(|a| Link::new(a.username.clone(), links.collection(&a.username)))
                .collect(),
        }
    }
}
