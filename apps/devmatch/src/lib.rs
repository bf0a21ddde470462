//! # DevMatch Library
//!
//! This library exposes the DevMatch CLI modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;

// Re-export the lower layers for convenience
pub use devmatch_core;
pub use devmatch_sdk;
