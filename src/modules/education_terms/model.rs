//! Education term data models and DTOs.
//!
//! Re-exports education term models from the `lectern-models` crate.

pub use lectern_models::education_terms::*;
