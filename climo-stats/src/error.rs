/// Error types for statistics over day-of-year slices
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatsError {
    /// The requested month/day has no historical rows with data.
    ///
    /// Happens for Feb 29 queries against histories whose leap days are all
    /// missing, and for variables that are missing across every year.
    #[error("No historical data for {month:02}-{day:02}")]
    EmptySlice { month: u32, day: u32 },

    /// The filtered series has no row for the target year
    #[error("No data recorded for target year {year}")]
    NoCurrentYearData { year: i32 },
}

/// Type alias for Results using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;
