//! OpenAPI document for the bookmark API, served at `GET /openapi.json`.

use crate::error::ErrorBody;
use crate::hal::{BookmarkCollection, BookmarkResource, RootDocument};
use crate::model::{Bookmark, NewBookmark};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookmarks HAL API",
        description = "Per-user bookmark collections with HAL links."
    ),
    paths(
        crate::handlers::bookmark::root,
        crate::handlers::bookmark::list,
        crate::handlers::bookmark::create,
        crate::handlers::bookmark::read,
    ),
    components(schemas(
        Bookmark,
        NewBookmark,
        BookmarkResource,
        BookmarkCollection,
        RootDocument,
        ErrorBody
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_bookmark_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/bookmarks",
            "/bookmarks/{user_id}",
            "/bookmarks/{user_id}/{bookmark_id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
