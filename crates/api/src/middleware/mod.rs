//! Request middleware.

pub mod auth;

pub use auth::{AdminUser, CallerIdentity, require_admin};
