//! Single-station summary and history overview commands.

use chrono::{Datelike, Local, NaiveDate};
use climo_dashboard::{Dashboard, DashboardRequest};
use climo_iem::daily::fetch_daily_records;
use climo_iem::network::Network;
use climo_iem::record::clean;
use climo_iem::variable::WeatherVariable;

/// Runs one dashboard pass and prints the resulting view.
///
/// With `--json`, the full render-boundary view is emitted instead, in the
/// same shape a charting front-end would consume.
pub async fn run_summary(
    network: &str,
    station: &str,
    date: Option<NaiveDate>,
    variable: &str,
    json: bool,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let variable: WeatherVariable = variable.parse()?;
    let request = DashboardRequest {
        network: Network::new(network),
        station_id: station.to_string(),
        date: date.unwrap_or(today),
        variable,
    };

    let dashboard = Dashboard::new(today);
    let view = dashboard.render(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", view.title);
    println!("{}", view.info_text);
    println!();
    println!("{:>6} {:>10}", "year", variable.as_str());
    for row in &view.table_series {
        let marker = if row.year == view.stats.target_date.year() {
            " <- selected"
        } else {
            ""
        };
        println!("{:>6} {:>10.1}{}", row.year, row.value, marker);
    }
    Ok(())
}

/// Prints per-variable coverage and ranges over a station's full history,
/// straight off the cleaned table.
pub async fn run_describe(network: &str, station: &str) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let network = Network::new(network);
    let client = reqwest::Client::new();
    let raw = fetch_daily_records(&client, &network, station, today).await?;
    let table = clean(&raw)?;

    println!("{} daily records for {}", table.len(), table.station_id());
    println!(
        "{:<20} {:>7} {:>9} {:>9} {:>9}",
        "variable", "count", "mean", "min", "max"
    );
    for variable in WeatherVariable::ALL {
        let values: Vec<f32> = table.rows().filter_map(|row| variable.project(row)).collect();
        if values.is_empty() {
            println!("{:<20} {:>7}", variable, 0);
            continue;
        }
        let mean =
            values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64;
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        println!(
            "{:<20} {:>7} {:>9.2} {:>9.1} {:>9.1}",
            variable,
            values.len(),
            mean,
            min,
            max
        );
    }
    Ok(())
}
