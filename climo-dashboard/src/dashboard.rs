//! The memoized fetch -> clean -> filter -> summarize pipeline behind the
//! dashboard's render boundary.
//!
//! Every stage output is cached under its semantic inputs, so a UI change
//! recomputes only the stages downstream of the control that changed:
//!
//! | stage    | key                                      |
//! |----------|------------------------------------------|
//! | stations | network                                  |
//! | cleaned  | network, station, as-of horizon          |
//! | slice    | cleaned key + month-day                  |
//! | summary  | slice key + variable + target year       |
//!
//! Changing the weather-variable selector therefore never re-fetches a
//! station's history, and changing the date re-filters a cached table.

use crate::cache::PipelineCache;
use crate::error::{DashboardError, Result};
use crate::models::{BucketSeries, DashboardView, YearValue};
use chrono::{Datelike, NaiveDate};
use climo_iem::daily::fetch_daily_records;
use climo_iem::network::{fetch_stations, station_name, Network, Station};
use climo_iem::record::{clean, CleanedTable};
use climo_iem::variable::WeatherVariable;
use climo_stats::{select_day, summarize, DayOfYearSlice, SummaryStats, YEAR_BUCKETS};
use reqwest::Client;
use std::sync::Arc;

/// Stage id for station catalogs
pub const STAGE_STATIONS: &str = "stations";
/// Stage id for cleaned daily-record tables
pub const STAGE_CLEANED: &str = "cleaned";
/// Stage id for day-of-year slices
pub const STAGE_SLICE: &str = "slice";
/// Stage id for summary statistics
pub const STAGE_SUMMARY: &str = "summary";

/// The dashboard's input signals: one field per UI control
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRequest {
    pub network: Network,
    pub station_id: String,
    /// Target calendar date; its month/day pick the slice, its year picks
    /// the highlighted value
    pub date: NaiveDate,
    pub variable: WeatherVariable,
}

/// One dashboard session: HTTP client, stage cache, and fetch horizon.
///
/// All stages run on the caller's task; a fetch suspends the render pass
/// until the response arrives. `as_of` is fixed at construction so that
/// changing the target date never invalidates fetched history.
pub struct Dashboard {
    client: Client,
    cache: PipelineCache,
    as_of: NaiveDate,
}

impl Dashboard {
    /// A session with an unbounded cache, fetching history up to `as_of`
    /// (normally today)
    pub fn new(as_of: NaiveDate) -> Self {
        Dashboard::with_cache(as_of, PipelineCache::unbounded())
    }

    pub fn with_cache(as_of: NaiveDate, cache: PipelineCache) -> Self {
        Dashboard {
            client: Client::new(),
            cache,
            as_of,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// The station catalog for a network, fetched once per network
    pub async fn stations(&self, network: &Network) -> Result<Arc<Vec<Station>>> {
        if let Some(stations) = self.cache.get(STAGE_STATIONS, network.as_str()) {
            return Ok(stations);
        }
        let stations = fetch_stations(&self.client, network).await?;
        Ok(self.cache.insert(STAGE_STATIONS, network.as_str(), stations))
    }

    /// A station's cleaned history, fetched and cleaned once per
    /// (network, station, as-of)
    pub async fn cleaned_table(
        &self,
        network: &Network,
        station_id: &str,
    ) -> Result<Arc<CleanedTable>> {
        let key = self.cleaned_key(network, station_id);
        if let Some(table) = self.cache.get(STAGE_CLEANED, &key) {
            return Ok(table);
        }
        let raw = fetch_daily_records(&self.client, network, station_id, self.as_of).await?;
        let table = clean(&raw)?;
        Ok(self.cache.insert(STAGE_CLEANED, key, table))
    }

    /// The day-of-year slice for a target date's month and day
    pub async fn day_slice(
        &self,
        network: &Network,
        station_id: &str,
        date: NaiveDate,
    ) -> Result<Arc<DayOfYearSlice>> {
        let table = self.cleaned_table(network, station_id).await?;
        let key = self.slice_key(network, station_id, date);
        Ok(self
            .cache
            .get_or_compute(STAGE_SLICE, key, || select_day(&table, date)))
    }

    /// Summary statistics for the requested variable and target date
    pub async fn summary(&self, request: &DashboardRequest) -> Result<Arc<SummaryStats>> {
        let slice = self
            .day_slice(&request.network, &request.station_id, request.date)
            .await?;
        let key = self.summary_key(request);
        self.cache.try_get_or_compute(STAGE_SUMMARY, key, || {
            summarize(&slice, request.variable, request.date).map_err(DashboardError::from)
        })
    }

    /// Runs one full dashboard pass for the current input signals.
    ///
    /// Pure in its cached inputs: calling it again with an unchanged
    /// request reuses every stage. The rendering layer is expected to call
    /// this on every discrete widget change.
    pub async fn render(&self, request: &DashboardRequest) -> Result<DashboardView> {
        let stations = self.stations(&request.network).await?;
        let name = station_name(&stations, &request.station_id)
            .ok_or_else(|| DashboardError::StationNotFound(request.station_id.clone()))?
            .to_string();
        let slice = self
            .day_slice(&request.network, &request.station_id, request.date)
            .await?;
        let stats = self.summary(request).await?;
        Ok(build_view(&name, &slice, &stats, request))
    }

    fn cleaned_key(&self, network: &Network, station_id: &str) -> String {
        format!("{network}/{station_id}@{}", self.as_of)
    }

    fn slice_key(&self, network: &Network, station_id: &str, date: NaiveDate) -> String {
        format!(
            "{}:{:02}-{:02}",
            self.cleaned_key(network, station_id),
            date.month(),
            date.day()
        )
    }

    fn summary_key(&self, request: &DashboardRequest) -> String {
        format!(
            "{}:{}:{}",
            self.slice_key(&request.network, &request.station_id, request.date),
            request.variable,
            request.date.year()
        )
    }
}

/// Assembles the render-boundary view from cached stage outputs
fn build_view(
    station_name: &str,
    slice: &DayOfYearSlice,
    stats: &SummaryStats,
    request: &DashboardRequest,
) -> DashboardView {
    let series = slice.series(request.variable);

    let histogram_series: Vec<YearValue> = series
        .iter()
        .map(|&(year, value)| YearValue { year, value })
        .collect();

    let density_series: Vec<BucketSeries> = YEAR_BUCKETS
        .iter()
        .filter_map(|&(start_year, end_year)| {
            let values: Vec<f32> = series
                .iter()
                .filter(|(year, _)| (start_year..=end_year).contains(year))
                .map(|(_, value)| *value)
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(BucketSeries {
                    label: format!("{start_year}-{end_year}"),
                    values,
                })
            }
        })
        .collect();

    let mut table_series = histogram_series.clone();
    table_series.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.year.cmp(&b.year)));

    let title = format!(
        "{station_name} ({}) {} for {}",
        request.station_id,
        request.variable.label(),
        request.date.format("%b %-d")
    );

    let info_text = format!(
        "{} on {} was {:.1} {}, above {:.0}% of {} recorded years \
         (min {:.1} in {}, max {:.1} in {}, mean {:.1}).",
        request.variable.label(),
        request.date.format("%b %-d, %Y"),
        stats.target_value,
        request.variable.unit(),
        stats.target_percentile,
        stats.years,
        stats.min,
        stats.min_year,
        stats.max,
        stats.max_year,
        stats.mean
    );

    DashboardView {
        title,
        stats: stats.clone(),
        histogram_series,
        density_series,
        table_series,
        info_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climo_iem::record::DailyRecord;

    fn request() -> DashboardRequest {
        DashboardRequest {
            network: Network::new("CO_ASOS"),
            station_id: "DEN".to_string(),
            date: NaiveDate::from_ymd_opt(2022, 8, 6).unwrap(),
            variable: WeatherVariable::MaxTempF,
        }
    }

    fn slice_and_stats() -> (DayOfYearSlice, SummaryStats) {
        let rows = [(1995, 88.0), (2005, 101.0), (2015, 93.0), (2022, 97.0)]
            .iter()
            .map(|&(year, value)| {
                let mut row =
                    DailyRecord::empty(NaiveDate::from_ymd_opt(year, 8, 6).unwrap());
                row.max_temp_f = Some(value);
                row
            })
            .collect();
        let table = CleanedTable::from_rows("DEN", rows);
        let slice = select_day(&table, NaiveDate::from_ymd_opt(2022, 8, 6).unwrap());
        let stats = summarize(
            &slice,
            WeatherVariable::MaxTempF,
            NaiveDate::from_ymd_opt(2022, 8, 6).unwrap(),
        )
        .unwrap();
        (slice, stats)
    }

    #[test]
    fn test_build_view_title_and_info() {
        let (slice, stats) = slice_and_stats();
        let view = build_view("DENVER INTL", &slice, &stats, &request());
        assert_eq!(view.title, "DENVER INTL (DEN) Max Temperature for Aug 6");
        assert!(view.info_text.contains("97.0 F"));
        assert!(view.info_text.contains("above 50%"));
    }

    #[test]
    fn test_build_view_series_shapes() {
        let (slice, stats) = slice_and_stats();
        let view = build_view("DENVER INTL", &slice, &stats, &request());

        let years: Vec<i32> = view.histogram_series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1995, 2005, 2015, 2022]);

        // table rows sorted by value descending
        let table_years: Vec<i32> = view.table_series.iter().map(|p| p.year).collect();
        assert_eq!(table_years, vec![2005, 2022, 2015, 1995]);

        // empty buckets are omitted from the density groups
        let labels: Vec<&str> = view
            .density_series
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["1990-2009", "2010-2029"]);
        assert_eq!(view.density_series[0].values, vec![88.0, 101.0]);
    }

    #[test]
    fn test_stage_keys_separate_controls() {
        let dashboard = Dashboard::new(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        let req = request();
        let cleaned = dashboard.cleaned_key(&req.network, &req.station_id);
        let slice = dashboard.slice_key(&req.network, &req.station_id, req.date);
        let summary = dashboard.summary_key(&req);

        // the date's month/day reaches the slice key but not the cleaned key
        assert!(!cleaned.contains("08-06"));
        assert!(slice.contains("08-06"));
        // the variable only reaches the summary key
        assert!(!slice.contains("max_temp_f"));
        assert!(summary.contains("max_temp_f"));

        let mut other_year = req.clone();
        other_year.date = NaiveDate::from_ymd_opt(2021, 8, 6).unwrap();
        // same month/day in a different year: same slice, different summary
        assert_eq!(dashboard.slice_key(&other_year.network, &other_year.station_id, other_year.date), slice);
        assert_ne!(dashboard.summary_key(&other_year), summary);
    }
}
