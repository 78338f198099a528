pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod message;
pub mod metrics;
pub mod sink;
pub mod store;
pub mod tracker;
