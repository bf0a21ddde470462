//! # Dashboard Module
//!
//! Counts shown on the personal dashboard and the "my projects" view.
//!
//! Both are pure reductions over already-fetched lists. Neither depends on
//! input order.

use crate::model::{Application, ApplicationStatus, Project, ProjectStatus};
use serde::{Deserialize, Serialize};

/// Dashboard totals for one user.
///
/// The all-zero value doubles as the fallback when either fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub total_applications: usize,
    pub approved_applications: usize,
    pub pending_applications: usize,
}

impl DashboardSummary {
    /// Aggregate the user's created projects and submitted applications.
    pub fn aggregate(projects: &[Project], applications: &[Application]) -> Self {
        let count = |status: ApplicationStatus| {
            applications
                .iter()
                .filter(|a| a.status == status)
                .count()
        };
        Self {
            total_projects: projects.len(),
            total_applications: applications.len(),
            approved_applications: count(ApplicationStatus::Approved),
            pending_applications: count(ApplicationStatus::Pending),
        }
    }

    /// The fallback value.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Project counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub recruiting: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(
            Self {
                total: projects.len(),
                ..Self::default()
            },
            |mut stats, project| {
                match project.status {
                    ProjectStatus::Recruiting => stats.recruiting += 1,
                    ProjectStatus::InProgress => stats.in_progress += 1,
                    ProjectStatus::Completed => stats.completed += 1,
                }
                stats
            },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicationId, ProjectId, User, UserId};

    fn user() -> User {
        User {
            id: UserId(1),
            username: "dev".into(),
            nickname: String::new(),
            profile_img_url: String::new(),
        }
    }

    fn project(id: u64, status: ProjectStatus) -> Project {
        Project {
            id: ProjectId(id),
            title: format!("project {}", id),
            description: "d".into(),
            tech_stacks: vec!["Rust".into()],
            team_size: 3,
            current_team_size: 1,
            creator: user(),
            status,
            content: None,
            created_at: "2025-01-01T00:00:00".into(),
            duration_weeks: 4,
        }
    }

    fn application(id: u64, status: ApplicationStatus) -> Application {
        Application {
            id: ApplicationId(id),
            user: user(),
            status,
            applied_at: "2025-01-02T00:00:00".into(),
        }
    }

    #[test]
    fn aggregates_counts() {
        let projects = vec![
            project(1, ProjectStatus::Recruiting),
            project(2, ProjectStatus::InProgress),
            project(3, ProjectStatus::Completed),
        ];
        let applications = vec![
            application(1, ApplicationStatus::Approved),
            application(2, ApplicationStatus::Pending),
            application(3, ApplicationStatus::Approved),
            application(4, ApplicationStatus::Rejected),
        ];
        let summary = DashboardSummary::aggregate(&projects, &applications);
        assert_eq!(
            summary,
            DashboardSummary {
                total_projects: 3,
                total_applications: 4,
                approved_applications: 2,
                pending_applications: 1,
            }
        );
    }

    #[test]
    fn aggregation_ignores_order() {
        let mut applications = vec![
            application(1, ApplicationStatus::Pending),
            application(2, ApplicationStatus::Approved),
            application(3, ApplicationStatus::Rejected),
        ];
        let forward = DashboardSummary::aggregate(&[], &applications);
        applications.reverse();
        let backward = DashboardSummary::aggregate(&[], &applications);
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_lists_give_zero() {
        assert_eq!(DashboardSummary::aggregate(&[], &[]), DashboardSummary::zero());
    }

    #[test]
    fn summary_serializes_camel_case() {
        let json = serde_json::to_value(DashboardSummary::zero()).unwrap_or_default();
        assert_eq!(json["approvedApplications"], 0);
        assert_eq!(json["pendingApplications"], 0);
    }

    #[test]
    fn project_stats_by_status() {
        let projects = vec![
            project(1, ProjectStatus::Recruiting),
            project(2, ProjectStatus::Recruiting),
            project(3, ProjectStatus::Completed),
        ];
        let stats = ProjectStats::from_projects(&projects);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recruiting, 2);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 1);
    }
}
