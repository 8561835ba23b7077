//! Shared application state for all routes.

use crate::service::BookmarkService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookmarkService>,
}

impl AppState {
    pub fn new(service: BookmarkService) -> Self {
        AppState {
            service: Arc::new(service),
        }
    }
}
