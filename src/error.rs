use thiserror::Error;

/// Why a fetch cycle (or its preconditions) failed. Terminal for that cycle
/// only; the next trigger starts fresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("weather API key is not configured; set OPENWEATHER_API_KEY or pass --api-key")]
    MissingCredential,
    #[error("enter a city name to look up")]
    InvalidLocationInput,
    #[error("current conditions request failed with status {status}")]
    CurrentConditionsFetch { status: u16 },
    #[error("forecast request failed with status {status}")]
    ForecastFetch { status: u16 },
    #[error("network or decoding failure: {detail}")]
    NetworkOrParsing { detail: String },
}

impl SessionError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Self::NetworkOrParsing {
            detail: err.to_string(),
        }
    }
}
