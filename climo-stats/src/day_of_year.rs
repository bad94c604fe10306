/// Day-of-year filtering: one calendar day viewed across all recorded years
use chrono::{Datelike, NaiveDate};
use climo_iem::record::{CleanedTable, DailyRecord};
use climo_iem::variable::WeatherVariable;

/// The rows of a station's history sharing one (month, day).
///
/// Rows are in ascending year order, at most one per year. A slice may be
/// empty: a Feb 29 request against a history whose source years are not
/// leap years matches nothing, and downstream stages must treat that as
/// data, not as a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOfYearSlice {
    month: u32,
    day: u32,
    rows: Vec<DailyRecord>,
}

/// Selects the rows of `table` whose month and day match `target`,
/// regardless of year.
///
/// Pure and infallible; idempotent in the sense that re-filtering a slice's
/// rows by the same day returns the same rows.
pub fn select_day(table: &CleanedTable, target: NaiveDate) -> DayOfYearSlice {
    let (month, day) = (target.month(), target.day());
    let rows = table
        .rows()
        .filter(|row| row.date.month() == month && row.date.day() == day)
        .cloned()
        .collect();
    DayOfYearSlice { month, day, rows }
}

impl DayOfYearSlice {
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in ascending year order
    pub fn rows(&self) -> &[DailyRecord] {
        &self.rows
    }

    /// Projects one variable into a `(year, value)` series.
    ///
    /// Rows where the variable is missing are dropped here, so statistics
    /// only ever see present values; the row itself stays in the slice for
    /// other variables.
    pub fn series(&self, variable: WeatherVariable) -> Vec<(i32, f32)> {
        self.rows
            .iter()
            .filter_map(|row| variable.project(row).map(|value| (row.date.year(), value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climo_iem::record::CleanedTable;

    fn record(year: i32, month: u32, day: u32, max_temp_f: Option<f32>) -> DailyRecord {
        let mut row = DailyRecord::empty(NaiveDate::from_ymd_opt(year, month, day).unwrap());
        row.max_temp_f = max_temp_f;
        row
    }

    fn history() -> CleanedTable {
        CleanedTable::from_rows(
            "DEN",
            vec![
                record(2020, 8, 6, Some(90.0)),
                record(2020, 8, 7, Some(88.0)),
                record(2021, 8, 6, None),
                record(2022, 8, 6, Some(97.0)),
            ],
        )
    }

    #[test]
    fn test_select_day_filters_by_month_day() {
        let target = NaiveDate::from_ymd_opt(2022, 8, 6).unwrap();
        let slice = select_day(&history(), target);
        assert_eq!(slice.len(), 3);
        let years: Vec<i32> = slice.rows().iter().map(|r| r.date.year()).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
    }

    #[test]
    fn test_select_day_is_idempotent() {
        let target = NaiveDate::from_ymd_opt(2022, 8, 6).unwrap();
        let slice = select_day(&history(), target);
        let refiltered = select_day(
            &CleanedTable::from_rows("DEN", slice.rows().to_vec()),
            target,
        );
        assert_eq!(refiltered, slice);
    }

    #[test]
    fn test_select_day_feb_29_can_be_empty() {
        let table = CleanedTable::from_rows("DEN", vec![record(2021, 2, 28, Some(40.0))]);
        let target = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let slice = select_day(&table, target);
        assert!(slice.is_empty());
    }

    #[test]
    fn test_series_drops_missing_values_only() {
        let target = NaiveDate::from_ymd_opt(2022, 8, 6).unwrap();
        let slice = select_day(&history(), target);
        // 2021 is missing max_temp_f and falls out of the series
        assert_eq!(slice.series(WeatherVariable::MaxTempF).len(), 2);
        // but its row is still part of the slice
        assert_eq!(slice.len(), 3);
    }
}
