use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::FetchError;
use crate::model::{Forecast, UnitSystem};

const DAILY_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast/daily";

/// Days requested per fetch: today plus the week view.
const FORECAST_DAYS: u8 = 7;

/// Anything that can produce a forecast for a city. The controller is
/// written against this trait so tests can substitute a stub source.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<Forecast, FetchError>;
}

/// OpenWeather daily-forecast client. One outbound request per call;
/// no retries, no response caching, transport timeouts are whatever
/// reqwest defaults to.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl ForecastSource for WeatherClient {
    async fn fetch_forecast(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<Forecast, FetchError> {
        let cnt = FORECAST_DAYS.to_string();

        let res = self
            .http
            .get(DAILY_FORECAST_URL)
            .query(&[
                ("q", city),
                ("units", units.as_str()),
                ("cnt", cnt.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Request {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        decode_forecast(&body)
    }
}

/// Decode a daily-forecast body, rejecting responses with no days so
/// downstream code can rely on `Forecast::today()` existing.
fn decode_forecast(body: &str) -> Result<Forecast, FetchError> {
    let forecast: Forecast = serde_json::from_str(body)?;

    if forecast.days.is_empty() {
        return Err(FetchError::Decode(
            "forecast response contained no days".to_string(),
        ));
    }

    Ok(forecast)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Provider error bodies can echo non-ASCII city names; cut on a
    // char boundary so the slice can't panic mid-character.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "city": {"name": "Seattle", "country": "US"},
        "cnt": 2,
        "list": [
            {
                "dt": 1700000000,
                "sunrise": 1699972800,
                "sunset": 1700008800,
                "temp": {"day": 21.6, "min": 9.1, "max": 22.0, "night": 11.4},
                "pressure": 1012.5,
                "humidity": 64,
                "speed": 4.7,
                "weather": [
                    {"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}
                ]
            },
            {
                "dt": 1700086400,
                "sunrise": 1700059200,
                "sunset": 1700095200,
                "temp": {"day": 18.2, "min": 8.0, "max": 19.0, "night": 9.8},
                "pressure": 1009.0,
                "humidity": 71,
                "speed": 6.1,
                "weather": [
                    {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_daily_forecast_body() {
        let forecast = decode_forecast(SAMPLE).expect("sample should decode");

        assert_eq!(forecast.city.name, "Seattle");
        assert_eq!(forecast.city.country, "US");
        assert_eq!(forecast.days.len(), 2);

        let today = forecast.today();
        assert_eq!(today.humidity, 64);
        assert_eq!(today.condition().map(|c| c.icon.as_str()), Some("03d"));
        assert_eq!(forecast.week().len(), 1);
    }

    #[test]
    fn rejects_empty_day_list() {
        let body = r#"{"city": {"name": "Nowhere", "country": "XX"}, "list": []}"#;
        let err = decode_forecast(body).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn rejects_malformed_body() {
        let err = decode_forecast("{\"cod\":\"404\"").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn truncates_long_error_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncates_multibyte_bodies_on_char_boundaries() {
        // 300 bytes of three-byte chars; the cut point lands inside one.
        let body = "€".repeat(100);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert!(truncated.chars().take_while(|c| *c == '€').count() <= 66);

        let short = "città non trovata";
        assert_eq!(truncate_body(short), short);
    }
}
