//! Lesson data models and DTOs.
//!
//! Re-exports lesson models from the `lectern-models` crate.

pub use lectern_models::lessons::*;
