//! Route modules.

pub mod episode;
pub mod health;
pub mod sessions;
