//! Teacher data models and DTOs.
//!
//! Teachers share the user models in the `lectern-models` crate.

pub use lectern_models::users::{ChooseLessonProgramsDto, CreateTeacherDto, User};
