//! Application layer for the Reader context.

pub mod command_handlers;
pub mod driver;
pub mod presenter;
pub mod query_handlers;
pub mod subscription;
