/// Station catalog structures and fetching logic for IEM observing networks
use crate::error::{IemError, Result};
use csv::ReaderBuilder;
use log::info;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Endpoint listing the stations of one observing network as CSV
const NETWORK_TABLE_URL: &str = "https://mesonet.agron.iastate.edu/sites/networks.php";

/// Header name of the station identifier column
const STATION_ID_COLUMN: &str = "stid";

/// Header name of the station display name column
const STATION_NAME_COLUMN: &str = "station_name";

/// An IEM observing network, e.g. "CO_ASOS" for the Colorado ASOS stations.
///
/// Networks are opaque identifiers; the catalog endpoint resolves them to
/// their member stations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network(String);

impl Network {
    pub fn new(id: impl Into<String>) -> Self {
        Network(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single weather-observing site within a network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Short station code (e.g. "DEN" for Denver International)
    pub id: String,
    /// Human-readable station name used for chart titles
    pub name: String,
}

/// Fetches the station catalog for a network.
///
/// Stations are returned in the order the catalog lists them, which is the
/// order selection widgets should present them in.
///
/// # Errors
///
/// Returns `IemError` if the request fails, the response status is not
/// successful, or the response is not a parsable station table.
pub async fn fetch_stations(client: &Client, network: &Network) -> Result<Vec<Station>> {
    let url = format!(
        "{}?network={}&format=csv&nohtml=on",
        NETWORK_TABLE_URL,
        network.as_str()
    );
    info!("Fetching station catalog for {network}");
    let response = client.get(&url).send().await?;
    if response.status() != StatusCode::OK {
        return Err(IemError::Status(response.status()));
    }
    let body = response.text().await?;
    parse_station_csv(&body)
}

/// Parses a network table CSV into stations.
///
/// Columns are resolved by header name so extra columns (coordinates,
/// archive start) are tolerated.
pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_object.as_bytes());

    let header = rdr.headers()?.clone();
    let position = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IemError::Schema(format!("missing required column '{name}'")))
    };
    let id_idx = position(STATION_ID_COLUMN)?;
    let name_idx = position(STATION_NAME_COLUMN)?;

    let mut stations = Vec::new();
    for row in rdr.records() {
        let rho = row?;
        let id = rho.get(id_idx).unwrap_or("").trim();
        if id.is_empty() {
            continue;
        }
        stations.push(Station {
            id: id.to_string(),
            name: rho.get(name_idx).unwrap_or("").trim().to_string(),
        });
    }
    Ok(stations)
}

/// Resolves a station code to its display name, if the catalog knows it.
pub fn station_name<'a>(stations: &'a [Station], id: &str) -> Option<&'a str> {
    stations
        .iter()
        .find(|station| station.id == id)
        .map(|station| station.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATION_CSV: &str = r#"stid,station_name,lat,lon,elev,begints,iem_network
DEN,DENVER INTL,39.8328,-104.6575,1640,2000-03-01,CO_ASOS
COS,COLORADO SPRINGS,38.8055,-104.6883,1868,1948-01-01,CO_ASOS
GJT,GRAND JUNCTION,39.1336,-108.5395,1475,1947-01-01,CO_ASOS
"#;

    #[test]
    fn test_parse_station_csv() {
        let stations = parse_station_csv(STATION_CSV).unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].id, "DEN");
        assert_eq!(stations[0].name, "DENVER INTL");
        // catalog order is preserved
        assert_eq!(stations[2].id, "GJT");
    }

    #[test]
    fn test_parse_station_csv_missing_column() {
        let csv = "code,name\nDEN,DENVER INTL\n";
        let err = parse_station_csv(csv).unwrap_err();
        assert!(matches!(err, IemError::Schema(_)));
    }

    #[test]
    fn test_station_name_lookup() {
        let stations = parse_station_csv(STATION_CSV).unwrap();
        assert_eq!(station_name(&stations, "COS"), Some("COLORADO SPRINGS"));
        assert_eq!(station_name(&stations, "XYZ"), None);
    }
}
