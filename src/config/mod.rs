//! Configuration modules for the Lectern API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`jwt`]: JWT authentication configuration

pub mod cors;
pub mod database;
pub mod jwt;
