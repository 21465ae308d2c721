//! Core library for the `forecast` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast client
//! - Per-screen forecast view state (loading / loaded / failed)
//! - Persisted favorites and unit preference with live observation
//! - Display formatting helpers
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod state;
pub mod store;

pub use client::{ForecastSource, WeatherClient};
pub use config::Config;
pub use error::FetchError;
pub use model::{City, Condition, DayForecast, FavoriteCity, Forecast, UnitSystem, icon_url};
pub use state::{FetchState, ForecastController};
pub use store::FavoritesStore;
