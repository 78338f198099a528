//! Last-imported timestamp store abstractions and implementations.
//!
//! Provides the [`LastImportedStore`] trait and an in-memory implementation for
//! recording when a migration last completed successfully.

mod base;
pub mod memory;

pub use base::LastImportedStore;
