//! Lesson program data models and DTOs.
//!
//! Re-exports lesson program models from the `lectern-models` crate.

pub use lectern_models::lesson_programs::*;
