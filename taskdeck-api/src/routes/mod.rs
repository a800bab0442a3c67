/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: authentication endpoints (signup, login)
/// - `tasks`: task CRUD endpoints
/// - `categories`: category CRUD endpoints

pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;
