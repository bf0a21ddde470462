//! # Filter Module
//!
//! Search over a fetched project list.

use crate::model::{Project, ProjectStatus};

/// Case-insensitive search term plus an optional status.
///
/// A project matches when the term is a substring of its title, its
/// description or any of its tech stacks, and its status equals `status`
/// when one is set. An empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    search: String,
    status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn new(search: impl AsRef<str>, status: Option<ProjectStatus>) -> Self {
        Self {
            search: search.as_ref().trim().to_lowercase(),
            status,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.as_str();
        project.title.to_lowercase().contains(term)
            || project.description.to_lowercase().contains(term)
            || project
                .tech_stacks
                .iter()
                .any(|tech| tech.to_lowercase().contains(term))
    }

    /// Keep the matching projects, in their original order.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}
