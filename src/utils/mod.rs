//! Shared utilities.
//!
//! - [`jwt`]: JWT token creation and verification

pub mod jwt;
