//! Station catalog listing.

use climo_iem::network::{fetch_stations, Network};
use log::info;

/// Prints the station catalog of a network in selection order.
pub async fn run_stations(network: &str) -> anyhow::Result<()> {
    let network = Network::new(network);
    let client = reqwest::Client::new();
    let stations = fetch_stations(&client, &network).await?;
    info!("Catalog for {} has {} stations", network, stations.len());

    for station in &stations {
        println!("{:<6} {}", station.id, station.name);
    }
    Ok(())
}
