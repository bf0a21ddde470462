//! # DevMatch Core - The Logic
//!
//! Deterministic rules behind the DevMatch client.
//!
//! Everything here is pure: no async, no network, no file I/O. The SDK
//! (`devmatch-sdk`) moves these types over HTTP and the binary
//! (`apps/devmatch`) drives them from the command line.
//!
//! ## Modules
//!
//! ```text
//! model      REST resources, request bodies, the {msg, data} envelope
//! tags       tech-stack tag editor (trim, charset, capacity, dedup)
//! form       whole-form project validation, collected not short-circuited
//! scores     per-application score sheet, clamped to 1..=10
//! dashboard  dashboard counts and per-status project stats
//! filter     project list search
//! ```

pub mod dashboard;
pub mod filter;
pub mod form;
pub mod model;
pub mod scores;
pub mod tags;

pub use dashboard::{DashboardSummary, ProjectStats};
pub use filter::ProjectFilter;
pub use form::{ProjectDraft, ValidationError, ValidationErrors, validate_content};
pub use model::{
    AnalysisResult, ApiResponse, Application, ApplicationId, ApplicationStatus,
    ApplicationStatusUpdateRequest, LoginRequest, Project, ProjectApplyRequest,
    ProjectContentUpdateRequest, ProjectCreateRequest, ProjectId, ProjectStatus,
    ProjectStatusUpdateRequest, UnknownStatus, User, UserId,
};
pub use scores::{ScoreError, SkillLevel, TechScoreSheet, clamp_score};
pub use tags::{TagEditor, TagError, TechStackTags, validate_tech_name};

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum number of tech-stack tags on a project.
pub const MAX_TECH_STACKS: usize = 10;

/// Maximum length of a single tech-stack name, in characters.
pub const MAX_TECH_NAME_LEN: usize = 30;

/// Maximum project title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum project description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum project content length, in characters.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Lowest self-assessment score.
pub const MIN_SCORE: u8 = 1;

/// Highest self-assessment score.
pub const MAX_SCORE: u8 = 10;

/// Score every declared tech stack starts with.
pub const DEFAULT_SCORE: u8 = 5;
