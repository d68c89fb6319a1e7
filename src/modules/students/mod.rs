//! Students module.
//!
//! Student accounts, advisor assignments, enrollment status, and lesson
//! program choices.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
