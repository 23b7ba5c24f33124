//! Repository implementations of the core persistence traits.

pub mod document;

pub use document::DocumentRepository;
