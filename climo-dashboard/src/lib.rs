//! Dashboard core: the reactive recomputation graph for day-of-year
//! climate views.
//!
//! The rendering layer (out of scope here) treats every UI control as an
//! input signal and calls [`Dashboard::render`] on each change; the
//! [`cache::PipelineCache`] makes unchanged stages cheap, so recomputation
//! cost tracks the control that actually moved.

pub mod cache;
pub mod dashboard;
pub mod error;
pub mod models;

pub use cache::PipelineCache;
pub use dashboard::{Dashboard, DashboardRequest};
pub use error::{DashboardError, Result};
pub use models::{BucketSeries, DashboardView, YearValue};
