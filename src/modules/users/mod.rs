//! Users module.
//!
//! Admin-managed accounts (admins and managers). Teachers and students
//! have their own modules layered on top of the same `users` table.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
