//! # DevMatch SDK - The Kit
//!
//! Typed access to the DevMatch REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devmatch_sdk::{DevMatchClient, ProjectFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), devmatch_sdk::Error> {
//!     let client = DevMatchClient::new("http://localhost:8080");
//!
//!     let projects = client.list_projects().await?;
//!     for project in ProjectFilter::new("rust", None).apply(&projects) {
//!         println!("{} ({})", project.title, project.status.label());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Stubs
//!
//! Some endpoints exist on the backend before they do anything. They answer
//! 200 with an empty body (or `data: null`); the client reports these as
//! [`Error::NotImplemented`] so callers can show a "coming soon" notice
//! instead of a failure.

mod client;
mod dashboard;
mod error;
pub mod session;

pub use client::{DEFAULT_TIMEOUT, DevMatchClient};
pub use dashboard::{DashboardView, load_dashboard};
pub use error::{Error, ErrorKind};
pub use session::{CachedSession, IdentityCache, SessionProvider};

pub use devmatch_core::*;
