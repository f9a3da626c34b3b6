//! Storyscroll: Episode content context.
//!
//! Responsible for the static episode model (pages, sections, lookup
//! tables), loading it from JSON or YAML, validating every symbolic
//! reference up front, and resolving names to color, image and audio tokens.

pub mod application;
pub mod domain;
