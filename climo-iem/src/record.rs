//! Cleaning of raw daily-record tables into strictly typed rows.
//!
//! The daily service reports missing data with sentinel strings ("M",
//! "None", empty cells). Cleaning coerces every weather cell to `f32` and
//! turns anything unparsable into `None` instead of failing: malformed
//! upstream cells must not abort the pipeline. Schema problems (a missing
//! column) are a hard error, so upstream drift is caught here rather than
//! as silent `None` columns.

use crate::daily::RawDailyTable;
use crate::error::{IemError, Result};
use crate::variable::WeatherVariable;
use chrono::NaiveDate;
use csv::StringRecord;
use log::warn;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Header name of the calendar date column
pub const DATE_COLUMN: &str = "day";

/// Date format of the daily service's date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of a station's history.
///
/// Every weather field is either a cleaned 32-bit reading or `None` for
/// missing/unparsable data. The station identifier column of the raw table
/// is dropped; the owning [`CleanedTable`] carries it once.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub max_temp_f: Option<f32>,
    pub min_temp_f: Option<f32>,
    pub max_dewpoint_f: Option<f32>,
    pub min_dewpoint_f: Option<f32>,
    pub precip_in: Option<f32>,
    pub avg_wind_speed_kts: Option<f32>,
    pub avg_wind_drct: Option<f32>,
    pub min_rh: Option<f32>,
    pub avg_rh: Option<f32>,
    pub max_rh: Option<f32>,
    pub climo_high_f: Option<f32>,
    pub climo_low_f: Option<f32>,
    pub climo_precip_in: Option<f32>,
    pub snow_in: Option<f32>,
    pub snowd_in: Option<f32>,
    pub min_feel: Option<f32>,
    pub avg_feel: Option<f32>,
    pub max_feel: Option<f32>,
    pub max_wind_speed_kts: Option<f32>,
    pub max_wind_gust_kts: Option<f32>,
    pub srad_mj: Option<f32>,
}

impl DailyRecord {
    /// A record for `date` with every weather field missing
    pub fn empty(date: NaiveDate) -> Self {
        DailyRecord {
            date,
            max_temp_f: None,
            min_temp_f: None,
            max_dewpoint_f: None,
            min_dewpoint_f: None,
            precip_in: None,
            avg_wind_speed_kts: None,
            avg_wind_drct: None,
            min_rh: None,
            avg_rh: None,
            max_rh: None,
            climo_high_f: None,
            climo_low_f: None,
            climo_precip_in: None,
            snow_in: None,
            snowd_in: None,
            min_feel: None,
            avg_feel: None,
            max_feel: None,
            max_wind_speed_kts: None,
            max_wind_gust_kts: None,
            srad_mj: None,
        }
    }
}

/// A station's full cleaned history, indexed by date.
///
/// Immutable once produced by [`clean`]; one row per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    station_id: String,
    rows: BTreeMap<NaiveDate, DailyRecord>,
}

impl CleanedTable {
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DailyRecord> {
        self.rows.get(date)
    }

    /// Rows in ascending date order
    pub fn rows(&self) -> impl Iterator<Item = &DailyRecord> {
        self.rows.values()
    }

    /// Builds a table directly from cleaned rows (duplicate dates: first wins)
    pub fn from_rows(station_id: impl Into<String>, rows: Vec<DailyRecord>) -> Self {
        let mut map = BTreeMap::new();
        for row in rows {
            map.entry(row.date).or_insert(row);
        }
        CleanedTable {
            station_id: station_id.into(),
            rows: map,
        }
    }
}

/// Column positions resolved from a raw table's header
struct Schema {
    date: usize,
    fields: [usize; WeatherVariable::ALL.len()],
}

impl Schema {
    fn resolve(header: &StringRecord) -> Result<Schema> {
        let position = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IemError::Schema(format!("missing required column '{name}'")))
        };
        let date = position(DATE_COLUMN)?;
        let mut fields = [0usize; WeatherVariable::ALL.len()];
        for (slot, variable) in fields.iter_mut().zip(WeatherVariable::ALL) {
            *slot = position(variable.as_str())?;
        }
        Ok(Schema { date, fields })
    }
}

/// Coerces a raw cell to a finite 32-bit float, `None` otherwise.
///
/// "M" (missing-data code), "None", empty cells, and any other unparsable
/// text all clean to `None`.
fn parse_cell(cell: Option<&str>) -> Option<f32> {
    cell.and_then(|raw| raw.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite())
}

/// Cleans a raw daily-record table into a typed, date-indexed table.
///
/// Deterministic and pure apart from logging: rows with unparsable dates
/// and duplicate dates are dropped with a warning, never an error.
///
/// # Errors
///
/// Returns `IemError::Schema` if the raw header lacks the date column or
/// any of the expected weather columns.
pub fn clean(raw: &RawDailyTable) -> Result<CleanedTable> {
    let schema = Schema::resolve(&raw.header)?;
    let mut rows: BTreeMap<NaiveDate, DailyRecord> = BTreeMap::new();

    for record in &raw.records {
        let date_cell = record.get(schema.date).unwrap_or("").trim();
        let date = match NaiveDate::parse_from_str(date_cell, DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                warn!(
                    "Dropping {} row with unparsable date '{}'",
                    raw.station_id, date_cell
                );
                continue;
            }
        };

        let mut row = DailyRecord::empty(date);
        for (idx, variable) in schema.fields.iter().zip(WeatherVariable::ALL) {
            variable.assign(&mut row, parse_cell(record.get(*idx)));
        }

        match rows.entry(date) {
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
            Entry::Occupied(_) => {
                // ties broken by source order: the first row for a date wins
                warn!("Dropping duplicate {} row for {}", raw.station_id, date);
            }
        }
    }

    Ok(CleanedTable {
        station_id: raw.station_id.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::request_to_raw_table;

    const STR_RESULT: &str = "\
station,day,max_temp_f,min_temp_f,max_dewpoint_f,min_dewpoint_f,precip_in,avg_wind_speed_kts,avg_wind_drct,min_rh,avg_rh,max_rh,climo_high_f,climo_low_f,climo_precip_in,snow_in,snowd_in,min_feel,avg_feel,max_feel,max_wind_speed_kts,max_wind_gust_kts,srad_mj
DEN,2022-08-04,95.0,63.0,55.0,41.0,0.00,7.9,182.0,13.2,34.5,69.9,89.9,59.7,0.06,0.0,0.0,63.0,78.7,93.2,15.0,24.1,27.4
DEN,2022-08-05,M,64.0,57.9,46.9,0.12,8.4,175.0,15.8,40.1,75.3,89.9,59.7,0.06,None,0.0,64.0,77.5,91.0,16.0,25.1,26.1
DEN,2022-08-06,97.0,65.0,58.1,44.1,0.00,9.1,190.0,12.4,33.0,66.2,89.8,59.8,0.06,0.0,0.0,65.0,79.9,94.8,17.1,26.0,28.0
";

    fn cleaned_fixture() -> CleanedTable {
        let raw = request_to_raw_table("DEN", STR_RESULT).unwrap();
        clean(&raw).unwrap()
    }

    #[test]
    fn test_clean_parses_numeric_cells() {
        let table = cleaned_fixture();
        assert_eq!(table.len(), 3);
        let day = NaiveDate::from_ymd_opt(2022, 8, 4).unwrap();
        let row = table.get(&day).unwrap();
        assert_eq!(row.max_temp_f, Some(95.0));
        assert_eq!(row.srad_mj, Some(27.4));
    }

    #[test]
    fn test_clean_malformed_cells_become_missing() {
        let table = cleaned_fixture();
        let day = NaiveDate::from_ymd_opt(2022, 8, 5).unwrap();
        let row = table.get(&day).unwrap();
        // "M" and "None" sentinels clean to missing
        assert_eq!(row.max_temp_f, None);
        assert_eq!(row.snow_in, None);
        // the rest of the row survives
        assert_eq!(row.min_temp_f, Some(64.0));
        assert_eq!(row.precip_in, Some(0.12));
    }

    #[test]
    fn test_clean_never_errors_on_cell_garbage() {
        let body = STR_RESULT.replace("97.0", "##BAD##");
        let raw = request_to_raw_table("DEN", &body).unwrap();
        let table = clean(&raw).unwrap();
        let day = NaiveDate::from_ymd_opt(2022, 8, 6).unwrap();
        assert_eq!(table.get(&day).unwrap().max_temp_f, None);
    }

    #[test]
    fn test_clean_drops_unparsable_date_rows() {
        let body = STR_RESULT.replace("2022-08-05", "not-a-date");
        let raw = request_to_raw_table("DEN", &body).unwrap();
        let table = clean(&raw).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_clean_duplicate_dates_first_wins() {
        let body = STR_RESULT.replace("2022-08-05", "2022-08-04");
        let raw = request_to_raw_table("DEN", &body).unwrap();
        let table = clean(&raw).unwrap();
        assert_eq!(table.len(), 2);
        let day = NaiveDate::from_ymd_opt(2022, 8, 4).unwrap();
        // the original 08-04 row, not the re-dated 08-05 one
        assert_eq!(table.get(&day).unwrap().max_temp_f, Some(95.0));
    }

    #[test]
    fn test_clean_missing_column_is_schema_error() {
        let body = STR_RESULT.replace("srad_mj", "solar");
        let raw = request_to_raw_table("DEN", &body);
        // the date column still resolves, so the fetch-level check passes
        let err = clean(&raw.unwrap()).unwrap_err();
        assert!(matches!(err, IemError::Schema(_)));
    }

    #[test]
    fn test_from_rows_indexes_by_date() {
        let d1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let table = CleanedTable::from_rows(
            "DEN",
            vec![
                DailyRecord::empty(d2),
                DailyRecord::empty(d1),
            ],
        );
        let dates: Vec<NaiveDate> = table.rows().map(|row| row.date).collect();
        assert_eq!(dates, vec![d1, d2]);
    }
}
