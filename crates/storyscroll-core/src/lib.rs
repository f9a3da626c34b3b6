//! Storyscroll Core: shared domain abstractions.
//!
//! This crate defines the identifiers, collaborator traits, session clock and
//! error types that the content and reader contexts depend on.

pub mod audio;
pub mod clock;
pub mod error;
pub mod event;
pub mod ids;
pub mod layout;
