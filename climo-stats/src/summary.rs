//! Summary statistics for a single weather variable on one day of the year.
//!
//! All statistics are computed over present values only; the `years` count
//! used in chart titles is the number of years that actually recorded the
//! variable, not the number of rows in the slice.

use crate::day_of_year::DayOfYearSlice;
use crate::error::{Result, StatsError};
use chrono::{Datelike, NaiveDate};
use climo_iem::variable::WeatherVariable;
use serde::Serialize;

/// Fixed 20-year grouping bins for density charts.
///
/// Bucket boundaries are a constant table, not computed from data. Years
/// outside the table (the archive reaches back to 1928) contribute to the
/// scalar statistics but are not bucketed.
pub const YEAR_BUCKETS: [(i32, i32); 5] = [
    (1930, 1949),
    (1950, 1969),
    (1970, 1989),
    (1990, 2009),
    (2010, 2029),
];

/// Number of years falling into one fixed bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearBucketCount {
    pub start_year: i32,
    pub end_year: i32,
    pub count: usize,
}

impl YearBucketCount {
    /// Bucket label for chart legends, e.g. "1990-2009"
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }
}

/// Summary of one variable's distribution on one day of the year.
///
/// Derived and ephemeral: recomputed on demand, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub variable: WeatherVariable,
    pub target_date: NaiveDate,
    /// Number of years with a present value for this variable
    pub years: usize,
    pub min: f32,
    /// Year the minimum occurred; earliest year on ties
    pub min_year: i32,
    pub max: f32,
    /// Year the maximum occurred; earliest year on ties
    pub max_year: i32,
    pub mean: f32,
    pub median: f32,
    /// The target year's recorded value
    pub target_value: f32,
    /// Strict-less-than percentile rank of the target value, in [0, 100]
    pub target_percentile: f32,
    pub bucketed_counts: Vec<YearBucketCount>,
}

/// Computes summary statistics for `variable` over a day-of-year slice.
///
/// The target year's value must be present in the series; it is never
/// inferred from row position.
///
/// # Errors
///
/// `StatsError::EmptySlice` if no year recorded the variable on this day,
/// `StatsError::NoCurrentYearData` if the target year has no present value.
pub fn summarize(
    slice: &DayOfYearSlice,
    variable: WeatherVariable,
    target_date: NaiveDate,
) -> Result<SummaryStats> {
    let series = slice.series(variable);
    if series.is_empty() {
        return Err(StatsError::EmptySlice {
            month: slice.month(),
            day: slice.day(),
        });
    }

    let target_year = target_date.year();
    let target_value = series
        .iter()
        .find(|(year, _)| *year == target_year)
        .map(|(_, value)| *value)
        .ok_or(StatsError::NoCurrentYearData { year: target_year })?;

    // series is in ascending year order, so strict comparisons keep the
    // earliest year on ties
    let (mut min_year, mut min) = series[0];
    let (mut max_year, mut max) = series[0];
    for &(year, value) in &series[1..] {
        if value < min {
            min = value;
            min_year = year;
        }
        if value > max {
            max = value;
            max_year = year;
        }
    }

    let values: Vec<f32> = series.iter().map(|(_, value)| *value).collect();
    let mean = (values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64) as f32;

    Ok(SummaryStats {
        variable,
        target_date,
        years: values.len(),
        min,
        min_year,
        max,
        max_year,
        mean,
        median: median(&values),
        target_value,
        target_percentile: percentile_strict(&values, target_value),
        bucketed_counts: bucket_years(&series),
    })
}

/// Strict-less-than percentile rank: `100 * |{v : v < target}| / |values|`.
///
/// Ties at exactly the target value do not inflate its rank.
pub fn percentile_strict(values: &[f32], target: f32) -> f32 {
    let below = values.iter().filter(|value| **value < target).count();
    100.0 * below as f32 / values.len() as f32
}

fn median(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn bucket_years(series: &[(i32, f32)]) -> Vec<YearBucketCount> {
    YEAR_BUCKETS
        .iter()
        .map(|&(start_year, end_year)| YearBucketCount {
            start_year,
            end_year,
            count: series
                .iter()
                .filter(|(year, _)| (start_year..=end_year).contains(year))
                .count(),
        })
        .collect()
}
