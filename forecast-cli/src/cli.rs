use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::Text;

use forecast_core::{
    Config, FavoriteCity, FavoritesStore, FetchState, ForecastController, UnitSystem,
    WeatherClient,
};

use crate::screens;

/// Top-level CLI struct. Each subcommand maps to one screen of the
/// app; no subcommand shows the splash screen and drops into search.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast app")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for a city, then show its forecast.
    Search,

    /// Show the forecast for a city.
    Show {
        /// City name, e.g. "Seattle".
        city: String,

        /// Also save this city to favorites.
        #[arg(long)]
        favorite: bool,
    },

    /// List or edit saved cities.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Show or change the unit preference.
    Settings {
        /// New unit system: "metric" or "imperial".
        #[arg(long)]
        unit: Option<String>,
    },

    /// About this app.
    About,

    /// Store your OpenWeather API key.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// Save a city.
    Add { city: String, country: String },

    /// Remove a saved city.
    Remove { city: String, country: String },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => {
                screens::render_splash();
                search().await
            }
            Some(Command::Search) => search().await,
            Some(Command::Show { city, favorite }) => show(&city, favorite).await,
            Some(Command::Favorites { action }) => favorites(action),
            Some(Command::Settings { unit }) => settings(unit.as_deref()),
            Some(Command::About) => {
                screens::render_about();
                Ok(())
            }
            Some(Command::Configure) => configure(),
        }
    }
}

async fn search() -> Result<()> {
    let city = Text::new("City:")
        .with_help_message("City name, e.g. Seattle")
        .prompt()?;

    show(city.trim(), false).await
}

/// The main screen: fetch the forecast with the persisted unit
/// preference and render it, or a generic failure line.
async fn show(city: &str, save_favorite: bool) -> Result<()> {
    let config = Config::load()?;
    let store = FavoritesStore::open()?;
    let unit = store.unit();

    let client = WeatherClient::new(config.api_key()?.to_owned());
    let controller = ForecastController::new(Arc::new(client));

    match controller.load_forecast(city, unit).await {
        FetchState::Loaded(forecast) => {
            screens::render_main(&forecast, unit);

            if save_favorite {
                store.insert_favorite(FavoriteCity::new(
                    forecast.city.name.clone(),
                    forecast.city.country.clone(),
                ));
                println!("\nSaved {} to favorites.", forecast.city.name);
            }
        }
        FetchState::Failed(err) => {
            tracing::warn!(city, error = %err, "forecast fetch failed");
            println!("Could not load the forecast for \"{city}\". Try again or check the city name.");
        }
        FetchState::Loading => unreachable!("load_forecast always settles"),
    }

    Ok(())
}

fn favorites(action: Option<FavoritesAction>) -> Result<()> {
    let store = FavoritesStore::open()?;

    match action {
        None => screens::render_favorites(&store.favorites()),
        Some(FavoritesAction::Add { city, country }) => {
            store.insert_favorite(FavoriteCity::new(city.clone(), country));
            println!("Saved {city} to favorites.");
        }
        Some(FavoritesAction::Remove { city, country }) => {
            store.delete_favorite(&FavoriteCity::new(city.clone(), country));
            println!("Removed {city} from favorites.");
        }
    }

    Ok(())
}

fn settings(unit: Option<&str>) -> Result<()> {
    let store = FavoritesStore::open()?;

    match unit {
        None => {
            println!("Units: {}", store.unit());
            println!("Change with `forecast settings --unit metric|imperial`.");
        }
        Some(raw) => {
            let unit = UnitSystem::try_from(raw)?;
            store.set_unit(unit);
            println!("Units set to {unit}.");
        }
    }

    Ok(())
}

fn configure() -> Result<()> {
    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()?;

    let mut config = Config::load()?;
    config.set_api_key(api_key.trim().to_owned());
    config.save()?;

    println!("API key saved to {}.", Config::config_file_path()?.display());
    Ok(())
}
