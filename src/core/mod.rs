//! Core request logic.
//!
//! - Filter: pure list filtering
//! - Handler: read and mutation paths over URL state

pub mod filter;
pub mod handler;

pub use filter::{apply_filters, available_types};
pub use handler::{apply_mutation, build_view, load_page, HandlerError, Mutation, PageView};
