//! Driving port for the dashboard counters.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Counters recomputed on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_skills: usize,
    pub teaching_skills: usize,
    pub learning_skills: usize,
    pub pending_received: usize,
    /// Completed requests on either side.
    pub completed_swaps: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn summary(&self, user: &UserId) -> Result<DashboardSummary, Error>;
}
