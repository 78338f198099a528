mod environment;
pub mod shared;

pub use environment::*;
