//! Terminal rendering for the app's screens.
//!
//! Layout mirrors the phone app this tool grew out of: a main screen
//! with today's conditions up top and a "This Week" list below, plus
//! favorites and about screens.

use forecast_core::format::{format_date, format_day, format_temperature, format_time};
use forecast_core::{DayForecast, FavoriteCity, Forecast, UnitSystem, icon_url};

pub fn render_splash() {
    println!("  .-~~~-.");
    println!(" (  o    )   forecast");
    println!("  `-~~~-'");
    println!();
}

/// Today's conditions plus the week list.
pub fn render_main(forecast: &Forecast, unit: UnitSystem) {
    let today = forecast.today();

    println!("{}, {}", forecast.city.name, forecast.city.country);
    println!("{}", format_date(today.dt));
    println!();

    println!("  {}", format_temperature(Some(today.temp.day)));
    if let Some(condition) = today.condition() {
        println!("  {}", condition.main);
        println!("  {}", icon_url(&condition.icon));
    }
    println!();

    println!(
        "humidity {}%   pressure {:.0} hPa   wind {:.1} {}",
        today.humidity,
        today.pressure,
        today.speed,
        unit.speed_suffix()
    );
    println!(
        "sunrise {}   sunset {}",
        format_time(today.sunrise),
        format_time(today.sunset)
    );

    let week = forecast.week();
    if !week.is_empty() {
        println!();
        println!("This Week");
        for day in week {
            render_week_row(day);
        }
    }
}

fn render_week_row(day: &DayForecast) {
    let condition = day.condition().map(|c| c.main.as_str()).unwrap_or("-");

    println!(
        "  {:<4} {:<14} {:>5} / {}",
        format_day(day.dt),
        condition,
        format_temperature(Some(day.temp.day)),
        format_temperature(Some(day.temp.night)),
    );
}

pub fn render_favorites(favorites: &[FavoriteCity]) {
    if favorites.is_empty() {
        println!("No saved cities yet. Add one with `forecast favorites add <CITY> <COUNTRY>`.");
        return;
    }

    println!("Saved cities");
    for favorite in favorites {
        println!("  {}, {}", favorite.city, favorite.country);
    }
}

pub fn render_about() {
    println!("forecast {}", env!("CARGO_PKG_VERSION"));
    println!("Multi-day weather forecasts with saved cities.");
    println!("Data from OpenWeather (https://openweathermap.org).");
}
