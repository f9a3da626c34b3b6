//! Storyscroll: Reader context.
//!
//! Responsible for mapping scroll position to the current section and page,
//! coordinating page hide/show transitions and background crossfades, and
//! running one reading session per event-driven task.

pub mod application;
pub mod domain;
