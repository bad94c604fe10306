/// Daily record fetching logic for the IEM daily service
use crate::error::{IemError, Result};
use crate::network::Network;
use crate::record::DATE_COLUMN;
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use log::info;
use reqwest::{Client, StatusCode};

/// Endpoint serving the full daily history of a station as CSV
const DAILY_URL: &str = "https://mesonet.agron.iastate.edu/cgi-bin/request/daily.py";

/// First year of history requested from the daily service
pub const HISTORY_START_YEAR: i32 = 1928;

/// A station's raw daily-record table, as returned by the daily service.
///
/// Rows are unparsed; [`crate::record::clean`] turns them into a typed
/// [`crate::record::CleanedTable`]. The station identifier is carried from
/// the fetch key so the redundant station column can be dropped.
#[derive(Debug, Clone)]
pub struct RawDailyTable {
    pub station_id: String,
    pub header: StringRecord,
    pub records: Vec<StringRecord>,
}

/// Fetches the full daily history for one station.
///
/// `as_of` is the upper bound on returned history; the lower bound is fixed
/// at January 1 of [`HISTORY_START_YEAR`]. Failures surface immediately:
/// there is no retry and no caching of failed requests.
///
/// # Errors
///
/// Returns `IemError` on request failure, a non-success status, or a
/// response that is not a delimited table with a recognizable date column.
pub async fn fetch_daily_records(
    client: &Client,
    network: &Network,
    station_id: &str,
    as_of: NaiveDate,
) -> Result<RawDailyTable> {
    let url = format!(
        "{}?network={}&stations={}&year1={}&month1=1&day1=1&year2={}&month2={}&day2={}",
        DAILY_URL,
        network.as_str(),
        station_id,
        HISTORY_START_YEAR,
        as_of.year(),
        as_of.month(),
        as_of.day()
    );
    info!("Fetching daily records for {station_id} ({network}) through {as_of}");
    let response = client.get(&url).send().await?;
    if response.status() != StatusCode::OK {
        return Err(IemError::Status(response.status()));
    }
    let body = response.text().await?;
    let table = request_to_raw_table(station_id, &body)?;
    info!(
        "Fetched {} daily records for {station_id}",
        table.records.len()
    );
    Ok(table)
}

/// Parses a daily service response body into a raw table.
///
/// The header must contain the date column; everything else is validated
/// later, at the cleaning boundary.
pub fn request_to_raw_table(station_id: &str, body: &str) -> Result<RawDailyTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body.as_bytes());
    let header = rdr.headers()?.clone();
    if !header.iter().any(|h| h.trim() == DATE_COLUMN) {
        return Err(IemError::Schema(format!(
            "response has no '{DATE_COLUMN}' date column"
        )));
    }
    let records = rdr
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(IemError::from)?;
    Ok(RawDailyTable {
        station_id: station_id.to_string(),
        header,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_to_raw_table() {
        let body = "\
station,day,max_temp_f,min_temp_f
DEN,2022-08-04,95.0,63.0
DEN,2022-08-05,96.0,64.0
";
        let table = request_to_raw_table("DEN", body).unwrap();
        assert_eq!(table.station_id, "DEN");
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].get(1), Some("2022-08-04"));
    }

    #[test]
    fn test_request_without_date_column() {
        let body = "station,date,max_temp_f\nDEN,2022-08-04,95.0\n";
        let err = request_to_raw_table("DEN", body).unwrap_err();
        assert!(matches!(err, IemError::Schema(_)));
    }

    #[test]
    fn test_request_to_raw_table_html_error_page() {
        // an HTML error body has no date column and must not parse
        let body = "<html><body>Service unavailable</body></html>";
        assert!(request_to_raw_table("DEN", body).is_err());
    }
}
