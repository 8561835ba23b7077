//! HTTP handlers for the bookmark API.

pub mod bookmark;
pub use bookmark::*;
