//! Authentication module.
//!
//! Login, current-user profile, and password changes. Account creation is
//! owned by the users, teachers, and students modules.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
