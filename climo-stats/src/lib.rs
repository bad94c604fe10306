//! Data processing for day-of-year climate analysis.
//!
//! This crate handles transforming a station's cleaned daily history into
//! the single-day-across-all-years views and summary statistics the
//! dashboard renders.

pub mod day_of_year;
pub mod error;
pub mod summary;

pub use day_of_year::{select_day, DayOfYearSlice};
pub use error::{Result, StatsError};
pub use summary::{summarize, SummaryStats, YearBucketCount, YEAR_BUCKETS};
