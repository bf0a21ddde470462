//! # Model Module
//!
//! Plain DTOs mirroring the DevMatch REST resources.
//!
//! The backend owns every entity. These are request-scoped copies: they
//! reflect the last successful fetch and carry no invariants of their own.
//! Wire format is camelCase JSON; statuses travel as SCREAMING_SNAKE names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

/// Identifier of an application to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The `{ msg, data }` envelope every successful response is wrapped in.
///
/// `data` is optional: backend stubs answer with a message and no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload.
    pub fn new(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// An envelope carrying only a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            data: None,
        }
    }

    /// Take the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

// =============================================================================
// STATUSES
// =============================================================================

/// A status string that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

/// Accepts `in-progress`, `In Progress` and `IN_PROGRESS` alike.
fn normalize_status(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Recruiting,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ProjectStatus; 3] = [Self::Recruiting, Self::InProgress, Self::Completed];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "RECRUITING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "RECRUITING" => Ok(Self::Recruiting),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// A platform user, as embedded in projects and applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Older application payloads call this `name`.
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profile_img_url: String,
}

impl User {
    /// Nickname when set, username otherwise.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// A project as returned by `/projects` and `/users/{id}/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    pub team_size: u32,
    #[serde(default)]
    pub current_team_size: u32,
    pub creator: User,
    pub status: ProjectStatus,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub duration_weeks: u32,
}

impl Project {
    /// Open seats left on the team.
    pub fn open_seats(&self) -> u32 {
        self.team_size.saturating_sub(self.current_team_size)
    }
}

/// An application, as listed per user, per project, or fetched by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "applicationId", alias = "id")]
    pub id: ApplicationId,
    pub user: User,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_at: String,
}

/// Compatibility analysis of one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(alias = "analysisId")]
    pub id: u64,
    pub application_id: ApplicationId,
    /// 0 to 100.
    pub compatibility_score: f64,
    #[serde(default)]
    pub compatibility_reason: String,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /projects`. Built from a validated [`crate::ProjectDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateRequest {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub tech_stacks: Vec<String>,
    pub team_size: u32,
    pub duration_weeks: u32,
}

/// Body of `PATCH /projects/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatusUpdateRequest {
    pub status: ProjectStatus,
}

/// Body of `PATCH /projects/{id}/content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContentUpdateRequest {
    pub content: String,
}

/// Body of `POST /projects/{id}/applications`.
///
/// `tech_scores[i]` is the applicant's score for `tech_stacks[i]`; the
/// backend pairs them by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectApplyRequest {
    pub user_id: UserId,
    pub tech_stacks: Vec<String>,
    pub tech_scores: Vec<u8>,
}

/// Body of `PATCH /applications/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatusUpdateRequest {
    pub status: ApplicationStatus,
}

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_parses_loose_spellings() {
        assert_eq!("recruiting".parse::<ProjectStatus>(), Ok(ProjectStatus::Recruiting));
        assert_eq!("in-progress".parse::<ProjectStatus>(), Ok(ProjectStatus::InProgress));
        assert_eq!(" In Progress ".parse::<ProjectStatus>(), Ok(ProjectStatus::InProgress));
        assert_eq!("COMPLETED".parse::<ProjectStatus>(), Ok(ProjectStatus::Completed));
        assert!("done".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn application_status_round_trips_wire_name() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
    }

    #[test]
    fn open_seats_saturates() {
        let project = Project {
            id: ProjectId(1),
            title: "t".into(),
            description: "d".into(),
            tech_stacks: vec![],
            team_size: 3,
            current_team_size: 5,
            creator: User {
                id: UserId(1),
                username: "u".into(),
                nickname: String::new(),
                profile_img_url: String::new(),
            },
            status: ProjectStatus::Recruiting,
            content: None,
            created_at: String::new(),
            duration_weeks: 4,
        };
        assert_eq!(project.open_seats(), 0);
    }

    #[test]
    fn display_name_prefers_nickname() {
        let mut user = User {
            id: UserId(7),
            username: "kim".into(),
            nickname: String::new(),
            profile_img_url: String::new(),
        };
        assert_eq!(user.display_name(), "kim");
        user.nickname = "Kimmy".into();
        assert_eq!(user.display_name(), "Kimmy");
    }

    #[test]
    fn login_request_debug_hides_password() {
        let req = LoginRequest::new("alice", "hunter2");
        let debug = format!("{:?}", req);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
