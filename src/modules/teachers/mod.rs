//! Teachers module.
//!
//! Teacher accounts, advisor duties, and lesson program assignments.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
