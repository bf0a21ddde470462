//! Dashboard loading.
//!
//! Both lists are fetched concurrently and aggregated as a unit: if either
//! fetch fails the totals are all zero and the failure is kept alongside.

use devmatch_core::{DashboardSummary, UserId};
use tracing::warn;

use crate::client::DevMatchClient;
use crate::error::Error;

/// What the dashboard shows.
#[derive(Debug)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    /// Set when the totals are the zero fallback.
    pub failure: Option<Error>,
}

impl DashboardView {
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// Fetch a user's projects and applications and aggregate them.
pub async fn load_dashboard(client: &DevMatchClient, user: UserId) -> DashboardView {
    match tokio::try_join!(client.user_projects(user), client.user_applications(user)) {
        Ok((projects, applications)) => DashboardView {
            summary: DashboardSummary::aggregate(&projects, &applications),
            failure: None,
        },
        Err(e) => {
            warn!(user = %user, error = %e, "dashboard fetch failed; showing zero totals");
            DashboardView {
                summary: DashboardSummary::zero(),
                failure: Some(e),
            }
        }
    }
}
