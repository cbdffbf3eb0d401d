use chrono::Utc;
use futures::future;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::{
    CurrentConditions, ForecastEntry, ForecastSeries, Units, WeatherBundle,
};
use crate::error::SessionError;

const API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the two weather endpoints. Both calls share one parameter set
/// so a cycle's requests are always parameterized identically.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    lang: String,
}

impl WeatherClient {
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self::with_base_url(API_URL, lang)
    }

    /// Overridable base URL so tests can point at a local mock server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            lang: lang.into(),
        }
    }

    /// Issues the current-conditions and forecast requests concurrently and
    /// settles only when both have. Either failure fails the bundle; when
    /// both fail, the current-conditions error is reported.
    pub async fn fetch_bundle(
        &self,
        city: &str,
        units: Units,
        api_key: &str,
    ) -> Result<WeatherBundle, SessionError> {
        let (current, forecast) = future::join(
            self.current_conditions(city, units, api_key),
            self.forecast(city, units, api_key),
        )
        .await;

        Ok(WeatherBundle {
            current: current?,
            forecast: forecast?,
            fetched_at: Utc::now(),
        })
    }

    pub async fn current_conditions(
        &self,
        city: &str,
        units: Units,
        api_key: &str,
    ) -> Result<CurrentConditions, SessionError> {
        let response = self
            .http
            .get(format!("{}/weather", self.base_url))
            .query(&self.query_params(city, units, api_key))
            .send()
            .await
            .map_err(SessionError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::CurrentConditionsFetch {
                status: status.as_u16(),
            });
        }

        let payload: CurrentPayload = response.json().await.map_err(SessionError::network)?;
        Ok(payload.into_conditions())
    }

    pub async fn forecast(
        &self,
        city: &str,
        units: Units,
        api_key: &str,
    ) -> Result<ForecastSeries, SessionError> {
        let response = self
            .http
            .get(format!("{}/forecast", self.base_url))
            .query(&self.query_params(city, units, api_key))
            .send()
            .await
            .map_err(SessionError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::ForecastFetch {
                status: status.as_u16(),
            });
        }

        let payload: ForecastPayload = response.json().await.map_err(SessionError::network)?;
        Ok(payload.into_series())
    }

    fn query_params<'a>(
        &'a self,
        city: &'a str,
        units: Units,
        api_key: &'a str,
    ) -> [(&'static str, &'a str); 4] {
        [
            ("q", city),
            ("units", units.as_query()),
            ("appid", api_key),
            ("lang", self.lang.as_str()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    #[serde(default)]
    visibility: Option<f32>,
    #[serde(default)]
    timezone: i32,
    main: ReadingsBlock,
    #[serde(default)]
    wind: WindBlock,
    #[serde(default)]
    clouds: CloudsBlock,
    #[serde(default)]
    sys: SysBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct ReadingsBlock {
    #[serde(default)]
    temp: Option<f32>,
    #[serde(default)]
    feels_like: Option<f32>,
    #[serde(default)]
    humidity: Option<f32>,
    #[serde(default)]
    pressure: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct CloudsBlock {
    #[serde(default)]
    all: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct SysBlock {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

impl CurrentPayload {
    fn into_conditions(self) -> CurrentConditions {
        let condition = self.weather.into_iter().next().unwrap_or_default();
        CurrentConditions {
            location_name: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            cloud_cover: self.clouds.all,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            utc_offset_secs: self.timezone,
            description: condition.description,
            icon: condition.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    #[serde(default)]
    list: Vec<ForecastItem>,
    #[serde(default)]
    city: ForecastCity,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    #[serde(default)]
    main: ForecastReadings,
    #[serde(default)]
    pop: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastReadings {
    #[serde(default)]
    temp: Option<f32>,
    #[serde(default)]
    humidity: Option<f32>,
}

impl ForecastPayload {
    fn into_series(self) -> ForecastSeries {
        ForecastSeries {
            entries: self
                .list
                .into_iter()
                .map(|item| ForecastEntry {
                    timestamp: item.dt,
                    temperature: item.main.temp,
                    humidity: item.main.humidity,
                    precipitation_probability: item.pop,
                })
                .collect(),
            utc_offset_secs: self.city.timezone,
        }
    }
}
