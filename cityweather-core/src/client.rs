use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;
use tracing::{debug, info};

use crate::{config::Config, model::WeatherResult};

/// OpenWeather "current weather" endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Why a lookup failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with a status outside 200-299.
    #[error("weather provider responded with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// No usable response: DNS, refused connection, timeout, broken body.
    #[error("failed to reach weather provider")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("unexpected weather provider response: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Http { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http: Client::new(),
        }
    }

    /// Build a client from the endpoint, key and optional timeout in `config`.
    /// A timeout of zero seconds means no timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?.to_owned();

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            endpoint: config.endpoint.clone(),
            http,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        info!(city, "Looking up current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(Box::new(e)))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Network(Box::new(e)))?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                body: truncate_body(&body),
            });
        }

        debug!(body = %body, "Raw weather provider response");

        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

fn parse_current(body: &str) -> Result<WeatherResult, FetchError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("response contained no weather conditions".into()))?;

    Ok(WeatherResult {
        city_name: parsed.name,
        temperature_c: parsed.main.temp,
        description: condition.description,
        icon_code: condition.icon,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
