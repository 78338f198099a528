//! Message sink abstractions and implementations.
//!
//! Provides the [`MessageSink`] trait and implementations for delivering
//! human-readable progress messages to whoever is watching the run.

mod base;
pub mod log;
pub mod memory;

pub use base::MessageSink;
