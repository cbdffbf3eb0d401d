use clap::{Parser, ValueEnum};

use crate::domain::weather::Units;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skycast",
    version,
    about = "Live city weather with a periodically refreshed dashboard view"
)]
pub struct Cli {
    /// City name (default: Stockholm)
    pub city: Option<String>,

    /// Measurement system
    #[arg(long, value_enum, default_value_t = UnitsArg::Metric)]
    pub units: UnitsArg,

    /// OpenWeather API key; falls back to OPENWEATHER_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Response language code passed to the API
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Print one weather snapshot to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    #[must_use]
    pub fn default_city(&self) -> String {
        self.city.clone().unwrap_or_else(|| "Stockholm".to_string())
    }

    /// Flag wins over the environment; a blank key counts as missing.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}
