//! Router construction.

mod bookmark;
mod common;

pub use bookmark::bookmark_routes;
pub use common::common_routes_with_ready;
