//! # Lectern Core
//!
//! Core types, errors, and utilities for the Lectern API.
//!
//! This crate provides foundational types used throughout the Lectern
//! application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Secure password hashing and verification

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
