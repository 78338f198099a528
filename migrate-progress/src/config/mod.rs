//! Configuration objects for migration progress tracking.
//!
//! Re-exports configuration types required for tracker setup and operation.

// Re-exports.
pub use migrate_config::shared::*;
