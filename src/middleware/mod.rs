//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: JWT authentication extractor
//! - [`role`]: Role checking middleware and helpers
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. The `AuthUser` extractor validates the JWT and exposes its claims
//! 3. Role layers or per-handler checks decide whether the request may
//!    proceed

pub mod auth;
pub mod role;
