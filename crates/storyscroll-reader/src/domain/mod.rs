//! Domain layer for the Reader context.

pub mod commands;
pub mod config;
pub mod crossfade;
pub mod events;
pub mod geometry;
pub mod page_transition;
pub mod session;
pub mod state;
