//! Lessons module.
//!
//! The lesson catalog: course offerings with a credit score and a
//! compulsory flag, attached to weekly slots by the lesson programs module.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
