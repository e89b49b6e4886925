//! Core types used throughout the library.

pub mod config;
pub mod problem;
pub mod request;

// Re-export commonly used types
pub use config::*;
pub use problem::*;
pub use request::*;
