//! Education terms module.
//!
//! Dated enrollment periods tagged by label and start-date year. Every
//! create and update runs through the pure validator in [`validation`]
//! before anything is written.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod validation;
