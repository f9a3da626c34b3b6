//! Domain layer for the Episode content context.

pub mod episode;
pub mod visuals;
