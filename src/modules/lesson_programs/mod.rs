//! Lesson programs module.
//!
//! Weekly schedule slots tied to an education term. The pure conflict
//! rules live in [`schedule`]; the service applies them before linking
//! programs to teachers or students.

pub mod controller;
pub mod model;
pub mod router;
pub mod schedule;
pub mod service;
