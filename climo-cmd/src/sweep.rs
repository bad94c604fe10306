//! Whole-network sweep: one day of the year summarized for every station.

use chrono::{Local, NaiveDate};
use climo_dashboard::{Dashboard, DashboardRequest};
use climo_iem::network::Network;
use climo_iem::variable::WeatherVariable;
use futures::future::join_all;
use log::{info, warn};

/// Summarizes the target date for every station of a network.
///
/// Stations are fetched concurrently through one shared dashboard session,
/// so the catalog is loaded once and each station's history once. Stations
/// without data for the target year are skipped with a warning rather than
/// aborting the sweep.
pub async fn run_sweep(
    network: &str,
    date: Option<NaiveDate>,
    variable: &str,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let date = date.unwrap_or(today);
    let variable: WeatherVariable = variable.parse()?;
    let network = Network::new(network);

    let dashboard = Dashboard::new(today);
    let stations = dashboard.stations(&network).await?;
    info!(
        "Sweeping {} stations in {} for {} on {}",
        stations.len(),
        network,
        variable,
        date
    );

    let requests: Vec<DashboardRequest> = stations
        .iter()
        .map(|station| DashboardRequest {
            network: network.clone(),
            station_id: station.id.clone(),
            date,
            variable,
        })
        .collect();
    let results = join_all(requests.iter().map(|request| dashboard.render(request))).await;

    println!(
        "{:<6} {:>10} {:>11} {:>8}",
        "stid",
        variable.as_str(),
        "percentile",
        "years"
    );
    for (station, result) in stations.iter().zip(results) {
        match result {
            Ok(view) => println!(
                "{:<6} {:>10.1} {:>10.0}% {:>8}",
                station.id,
                view.stats.target_value,
                view.stats.target_percentile,
                view.stats.years
            ),
            Err(error) => warn!("Skipping {}: {}", station.id, error),
        }
    }
    Ok(())
}
