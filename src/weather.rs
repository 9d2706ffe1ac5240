/*
 *  weather.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use serde::Deserialize;
use serde_json::Error as JsonError;
use reqwest::{Client, header, StatusCode};
use std::fmt::{self, Display};
use std::time::{Duration, Instant};
use log::{info, warn};

use flate2::read::GzDecoder;
use std::io::Read;

use crate::constants::{VERSION, WEATHER_BACKOFF, WEATHER_BASE_URL, WEATHER_TIMEOUT, WEATHER_TTL};
use crate::deutils::deserialize_numeric_u16;

// Custom error type for weather operations.
#[derive(Debug)]
pub enum WeatherError {
    HttpRequestError(reqwest::Error),
    DeserializationError(JsonError),
    BadStatus(StatusCode),
    MissingData(String),
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::HttpRequestError(e) => write!(f, "HTTP request error: {}", e),
            WeatherError::DeserializationError(e) => write!(f, "JSON deserialization error: {}", e),
            WeatherError::BadStatus(s) => write!(f, "wttr.in answered {}", s),
            WeatherError::MissingData(msg) => write!(f, "Missing weather data: {}", msg),
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeatherError::HttpRequestError(e) => Some(e),
            WeatherError::DeserializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::HttpRequestError(err)
    }
}

impl From<JsonError> for WeatherError {
    fn from(err: JsonError) -> Self {
        WeatherError::DeserializationError(err)
    }
}

/// Source of the current weather condition code
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    async fn fetch_condition(&self) -> Result<u16, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "weatherCode", deserialize_with = "deserialize_numeric_u16")]
    weather_code: u16,
}

#[derive(Debug, Deserialize)]
struct WttrReport {
    #[serde(default)]
    current_condition: Vec<CurrentCondition>,
}

/// Pull `current_condition[0].weatherCode` out of a j1 report
pub fn parse_condition(body: &str) -> Result<u16, WeatherError> {
    let report: WttrReport = serde_json::from_str(body)?;
    report
        .current_condition
        .first()
        .map(|c| c.weather_code)
        .ok_or_else(|| WeatherError::MissingData("current_condition is empty".to_string()))
}

/// wttr.in j1 client
#[derive(Debug)]
pub struct WttrClient {
    url: String,
    location: String,
    client: Client,
}

impl WttrClient {
    pub fn new(location: &str) -> Result<Self, WeatherError> {
        Self::with_base_url(WEATHER_BASE_URL, location)
    }

    pub fn with_base_url(base_url: &str, location: &str) -> Result<Self, WeatherError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Accept-Encoding", header::HeaderValue::from_static("deflate, gzip"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(WEATHER_TIMEOUT)
            .build()?;

        Ok(WttrClient {
            url: format!("{}/{}", base_url.trim_end_matches('/'), location),
            location: location.to_string(),
            client,
        })
    }

}

impl WeatherProvider for WttrClient {
    async fn fetch_condition(&self) -> Result<u16, WeatherError> {
        info!("Fetching current weather for {}...", self.location);
        let response = self.client.get(&self.url)
            .query(&[("format", "j1")])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(WeatherError::BadStatus(response.status()));
        }
        let raw = response.bytes().await?;

        // Try to decode as gzip first, fall back to plain text if it fails
        let plain = {
            let mut decoder = GzDecoder::new(&raw[..]);
            let mut decoded = String::new();
            match decoder.read_to_string(&mut decoded) {
                Ok(_) => decoded,
                Err(_) => String::from_utf8_lossy(&raw).to_string(),
            }
        };
        parse_condition(&plain)
    }
}

/// Hourly weather cache with a retry backoff after failures
pub struct WeatherCache<P: WeatherProvider> {
    provider: P,
    condition: Option<u16>,
    fetched_at: Option<Instant>,
    ttl: Duration,
    backoff: Duration,
}

impl<P: WeatherProvider> WeatherCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            condition: None,
            fetched_at: None,
            ttl: WEATHER_TTL,
            backoff: WEATHER_BACKOFF,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current condition code. Hits the provider at most once per TTL while
    /// fetches succeed, and at most once per backoff window while they fail.
    pub async fn get_condition(&mut self, now: Instant) -> Option<u16> {
        if let Some(at) = self.fetched_at {
            let age = now.saturating_duration_since(at);
            if self.condition.is_some() && age < self.ttl {
                return self.condition;
            }
            if age < self.backoff {
                return self.condition;
            }
        }

        match self.provider.fetch_condition().await {
            Ok(code) => {
                info!("Weather updated: code {}", code);
                self.condition = Some(code);
            }
            Err(e) => {
                warn!("Weather fetch failed (will retry in {}m): {}", self.backoff.as_secs() / 60, e);
            }
        }
        // failures arm the backoff too
        self.fetched_at = Some(now);
        self.condition
    }
}
