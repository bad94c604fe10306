/// Weather variables reported by the IEM daily record service
use crate::error::IemError;
use crate::record::DailyRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the named numeric fields of a daily record.
///
/// Variant order matches the column order of the daily service, and
/// `as_str` returns the exact upstream column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherVariable {
    MaxTempF,
    MinTempF,
    MaxDewpointF,
    MinDewpointF,
    PrecipIn,
    AvgWindSpeedKts,
    AvgWindDrct,
    MinRh,
    AvgRh,
    MaxRh,
    ClimoHighF,
    ClimoLowF,
    ClimoPrecipIn,
    SnowIn,
    SnowdIn,
    MinFeel,
    AvgFeel,
    MaxFeel,
    MaxWindSpeedKts,
    MaxWindGustKts,
    SradMj,
}

impl WeatherVariable {
    /// All variables, in daily-service column order
    pub const ALL: [WeatherVariable; 21] = [
        WeatherVariable::MaxTempF,
        WeatherVariable::MinTempF,
        WeatherVariable::MaxDewpointF,
        WeatherVariable::MinDewpointF,
        WeatherVariable::PrecipIn,
        WeatherVariable::AvgWindSpeedKts,
        WeatherVariable::AvgWindDrct,
        WeatherVariable::MinRh,
        WeatherVariable::AvgRh,
        WeatherVariable::MaxRh,
        WeatherVariable::ClimoHighF,
        WeatherVariable::ClimoLowF,
        WeatherVariable::ClimoPrecipIn,
        WeatherVariable::SnowIn,
        WeatherVariable::SnowdIn,
        WeatherVariable::MinFeel,
        WeatherVariable::AvgFeel,
        WeatherVariable::MaxFeel,
        WeatherVariable::MaxWindSpeedKts,
        WeatherVariable::MaxWindGustKts,
        WeatherVariable::SradMj,
    ];

    /// Upstream column name for this variable
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF => "max_temp_f",
            WeatherVariable::MinTempF => "min_temp_f",
            WeatherVariable::MaxDewpointF => "max_dewpoint_f",
            WeatherVariable::MinDewpointF => "min_dewpoint_f",
            WeatherVariable::PrecipIn => "precip_in",
            WeatherVariable::AvgWindSpeedKts => "avg_wind_speed_kts",
            WeatherVariable::AvgWindDrct => "avg_wind_drct",
            WeatherVariable::MinRh => "min_rh",
            WeatherVariable::AvgRh => "avg_rh",
            WeatherVariable::MaxRh => "max_rh",
            WeatherVariable::ClimoHighF => "climo_high_f",
            WeatherVariable::ClimoLowF => "climo_low_f",
            WeatherVariable::ClimoPrecipIn => "climo_precip_in",
            WeatherVariable::SnowIn => "snow_in",
            WeatherVariable::SnowdIn => "snowd_in",
            WeatherVariable::MinFeel => "min_feel",
            WeatherVariable::AvgFeel => "avg_feel",
            WeatherVariable::MaxFeel => "max_feel",
            WeatherVariable::MaxWindSpeedKts => "max_wind_speed_kts",
            WeatherVariable::MaxWindGustKts => "max_wind_gust_kts",
            WeatherVariable::SradMj => "srad_mj",
        }
    }

    /// Human-readable label for chart titles
    pub fn label(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF => "Max Temperature",
            WeatherVariable::MinTempF => "Min Temperature",
            WeatherVariable::MaxDewpointF => "Max Dewpoint",
            WeatherVariable::MinDewpointF => "Min Dewpoint",
            WeatherVariable::PrecipIn => "Precipitation",
            WeatherVariable::AvgWindSpeedKts => "Avg Wind Speed",
            WeatherVariable::AvgWindDrct => "Avg Wind Direction",
            WeatherVariable::MinRh => "Min Relative Humidity",
            WeatherVariable::AvgRh => "Avg Relative Humidity",
            WeatherVariable::MaxRh => "Max Relative Humidity",
            WeatherVariable::ClimoHighF => "Climatological High",
            WeatherVariable::ClimoLowF => "Climatological Low",
            WeatherVariable::ClimoPrecipIn => "Climatological Precipitation",
            WeatherVariable::SnowIn => "Snowfall",
            WeatherVariable::SnowdIn => "Snow Depth",
            WeatherVariable::MinFeel => "Min Feels-Like",
            WeatherVariable::AvgFeel => "Avg Feels-Like",
            WeatherVariable::MaxFeel => "Max Feels-Like",
            WeatherVariable::MaxWindSpeedKts => "Max Wind Speed",
            WeatherVariable::MaxWindGustKts => "Max Wind Gust",
            WeatherVariable::SradMj => "Solar Radiation",
        }
    }

    /// Measurement unit for axis and info labels
    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF
            | WeatherVariable::MinTempF
            | WeatherVariable::MaxDewpointF
            | WeatherVariable::MinDewpointF
            | WeatherVariable::ClimoHighF
            | WeatherVariable::ClimoLowF
            | WeatherVariable::MinFeel
            | WeatherVariable::AvgFeel
            | WeatherVariable::MaxFeel => "F",
            WeatherVariable::PrecipIn
            | WeatherVariable::ClimoPrecipIn
            | WeatherVariable::SnowIn
            | WeatherVariable::SnowdIn => "in",
            WeatherVariable::AvgWindSpeedKts
            | WeatherVariable::MaxWindSpeedKts
            | WeatherVariable::MaxWindGustKts => "kts",
            WeatherVariable::AvgWindDrct => "deg",
            WeatherVariable::MinRh | WeatherVariable::AvgRh | WeatherVariable::MaxRh => "%",
            WeatherVariable::SradMj => "MJ/m2",
        }
    }

    /// Projects this variable out of a daily record
    pub fn project(&self, record: &DailyRecord) -> Option<f32> {
        match self {
            WeatherVariable::MaxTempF => record.max_temp_f,
            WeatherVariable::MinTempF => record.min_temp_f,
            WeatherVariable::MaxDewpointF => record.max_dewpoint_f,
            WeatherVariable::MinDewpointF => record.min_dewpoint_f,
            WeatherVariable::PrecipIn => record.precip_in,
            WeatherVariable::AvgWindSpeedKts => record.avg_wind_speed_kts,
            WeatherVariable::AvgWindDrct => record.avg_wind_drct,
            WeatherVariable::MinRh => record.min_rh,
            WeatherVariable::AvgRh => record.avg_rh,
            WeatherVariable::MaxRh => record.max_rh,
            WeatherVariable::ClimoHighF => record.climo_high_f,
            WeatherVariable::ClimoLowF => record.climo_low_f,
            WeatherVariable::ClimoPrecipIn => record.climo_precip_in,
            WeatherVariable::SnowIn => record.snow_in,
            WeatherVariable::SnowdIn => record.snowd_in,
            WeatherVariable::MinFeel => record.min_feel,
            WeatherVariable::AvgFeel => record.avg_feel,
            WeatherVariable::MaxFeel => record.max_feel,
            WeatherVariable::MaxWindSpeedKts => record.max_wind_speed_kts,
            WeatherVariable::MaxWindGustKts => record.max_wind_gust_kts,
            WeatherVariable::SradMj => record.srad_mj,
        }
    }

    /// Stores a cleaned value into the matching field of a daily record
    pub fn assign(&self, record: &mut DailyRecord, value: Option<f32>) {
        match self {
            WeatherVariable::MaxTempF => record.max_temp_f = value,
            WeatherVariable::MinTempF => record.min_temp_f = value,
            WeatherVariable::MaxDewpointF => record.max_dewpoint_f = value,
            WeatherVariable::MinDewpointF => record.min_dewpoint_f = value,
            WeatherVariable::PrecipIn => record.precip_in = value,
            WeatherVariable::AvgWindSpeedKts => record.avg_wind_speed_kts = value,
            WeatherVariable::AvgWindDrct => record.avg_wind_drct = value,
            WeatherVariable::MinRh => record.min_rh = value,
            WeatherVariable::AvgRh => record.avg_rh = value,
            WeatherVariable::MaxRh => record.max_rh = value,
            WeatherVariable::ClimoHighF => record.climo_high_f = value,
            WeatherVariable::ClimoLowF => record.climo_low_f = value,
            WeatherVariable::ClimoPrecipIn => record.climo_precip_in = value,
            WeatherVariable::SnowIn => record.snow_in = value,
            WeatherVariable::SnowdIn => record.snowd_in = value,
            WeatherVariable::MinFeel => record.min_feel = value,
            WeatherVariable::AvgFeel => record.avg_feel = value,
            WeatherVariable::MaxFeel => record.max_feel = value,
            WeatherVariable::MaxWindSpeedKts => record.max_wind_speed_kts = value,
            WeatherVariable::MaxWindGustKts => record.max_wind_gust_kts = value,
            WeatherVariable::SradMj => record.srad_mj = value,
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherVariable {
    type Err = IemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherVariable::ALL
            .iter()
            .find(|variable| variable.as_str() == s)
            .copied()
            .ok_or_else(|| IemError::UnknownVariable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_from_str_round_trip() {
        for variable in WeatherVariable::ALL {
            let parsed: WeatherVariable = variable.as_str().parse().unwrap();
            assert_eq!(parsed, variable);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "max_temp_c".parse::<WeatherVariable>().unwrap_err();
        assert!(matches!(err, IemError::UnknownVariable(_)));
    }

    #[test]
    fn test_assign_project_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 6).unwrap();
        for variable in WeatherVariable::ALL {
            let mut record = DailyRecord::empty(date);
            assert_eq!(variable.project(&record), None);
            variable.assign(&mut record, Some(42.5));
            assert_eq!(variable.project(&record), Some(42.5));
        }
    }
}
