//! Application layer for the Episode content context.

pub mod loader;
pub mod query_handlers;
