//! Object storage for uploaded document artifacts.
//!
//! Binaries are written under a timestamp-prefixed key and referenced by a
//! public retrieval URL plus the storage key itself.

pub mod config;
pub mod error;
pub mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, StoredObject};
