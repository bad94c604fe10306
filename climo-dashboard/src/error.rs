/// Error types for the dashboard pipeline
use climo_iem::error::IemError;
use climo_stats::StatsError;
use thiserror::Error;

/// Errors surfaced at the render boundary.
///
/// All pipeline-stage errors propagate here unrecovered; presenting them
/// without crashing is the rendering layer's job.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Fetching or parsing an upstream table failed
    #[error("Failed to load IEM data: {0}")]
    Fetch(#[from] IemError),

    /// Statistics could not be computed for the requested inputs
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The requested station is not in the network's catalog
    #[error("Station not found in catalog: {0}")]
    StationNotFound(String),
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
