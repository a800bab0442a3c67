//! # taskdeck Shared Library
//!
//! Shared types and business logic for the taskdeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, categories, tasks)
//! - `auth`: Password hashing, JWT tokens, bearer-auth context
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
