//! User data models and DTOs.
//!
//! Re-exports user models from the `lectern-models` crate.

pub use lectern_models::users::*;
