//! Feature modules.
//!
//! Each module follows the same layout: `model` (DTOs and re-exports),
//! `service` (database logic), `controller` (HTTP handlers), and `router`.

pub mod auth;
pub mod education_terms;
pub mod lesson_programs;
pub mod lessons;
pub mod students;
pub mod teachers;
pub mod users;
