//! BookmarkService: user validation, store orchestration and resource assembly.

mod bookmarks;
pub use bookmarks::BookmarkService;
