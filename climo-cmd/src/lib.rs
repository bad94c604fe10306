//! Command implementations for the climo CLI.
//!
//! Provides subcommands for browsing IEM networks and summarizing a day of
//! the year against a station's full recorded history.

use chrono::NaiveDate;
use clap::Subcommand;

pub mod stations;
pub mod summary;
pub mod sweep;

#[derive(Subcommand)]
pub enum Command {
    /// List the stations of an IEM observing network
    Stations {
        /// Network identifier, e.g. CO_ASOS
        #[arg(short, long, default_value = "CO_ASOS")]
        network: String,
    },

    /// Summarize one day of the year against a station's history
    Summary {
        /// Network identifier, e.g. CO_ASOS
        #[arg(short, long, default_value = "CO_ASOS")]
        network: String,

        /// Station code, e.g. DEN
        #[arg(short, long, default_value = "DEN")]
        station: String,

        /// Target date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Weather variable column name, e.g. max_temp_f
        #[arg(short, long, default_value = "max_temp_f")]
        variable: String,

        /// Emit the full dashboard view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print per-variable coverage and ranges of a station's history
    Describe {
        /// Network identifier, e.g. CO_ASOS
        #[arg(short, long, default_value = "CO_ASOS")]
        network: String,

        /// Station code, e.g. DEN
        #[arg(short, long, default_value = "DEN")]
        station: String,
    },

    /// Summarize one day of the year across every station of a network
    Sweep {
        /// Network identifier, e.g. CO_ASOS
        #[arg(short, long, default_value = "CO_ASOS")]
        network: String,

        /// Target date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Weather variable column name, e.g. max_temp_f
        #[arg(short, long, default_value = "max_temp_f")]
        variable: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stations { network } => stations::run_stations(&network).await,
        Command::Summary {
            network,
            station,
            date,
            variable,
            json,
        } => summary::run_summary(&network, &station, date, &variable, json).await,
        Command::Describe { network, station } => {
            summary::run_describe(&network, &station).await
        }
        Command::Sweep {
            network,
            date,
            variable,
        } => sweep::run_sweep(&network, date, &variable).await,
    }
}
