use serde::{Deserialize, Serialize};

/// City descriptor as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

/// One weather condition entry. Days carry a list of these; only the
/// first one is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Day/night temperature readings, in whatever units the request asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub day: f64,
    pub night: f64,
}

/// One day's slice of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Unix timestamp of the forecast day.
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: Temperature,
    pub pressure: f64,
    pub humidity: u8,
    /// Wind speed.
    pub speed: f64,
    pub weather: Vec<Condition>,
}

impl DayForecast {
    /// The condition that gets rendered, when the provider sent any.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// One city's multi-day forecast. `days` is non-empty by construction:
/// the client rejects responses with an empty day list at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    #[serde(rename = "list")]
    pub days: Vec<DayForecast>,
}

impl Forecast {
    /// Index 0 is always treated as the current conditions.
    pub fn today(&self) -> &DayForecast {
        &self.days[0]
    }

    /// The remaining days in original order, for the "this week" view.
    /// Empty when the forecast only contains today.
    pub fn week(&self) -> &[DayForecast] {
        self.days.get(1..).unwrap_or_default()
    }
}

/// A saved city. Identity is the (city, country) pair; entries are
/// never mutated in a way that changes identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub city: String,
    pub country: String,
}

impl FavoriteCity {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self { city: city.into(), country: country.into() }
    }

    pub fn same_identity(&self, other: &FavoriteCity) -> bool {
        self.city == other.city && self.country == other.country
    }
}

/// Measurement system sent to the provider and used for display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Token the provider expects in the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Image URL for a provider icon code. A pure string template; nothing
/// is fetched or cached here.
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(dt: i64) -> DayForecast {
        DayForecast {
            dt,
            sunrise: dt + 6 * 3600,
            sunset: dt + 18 * 3600,
            temp: Temperature { day: 20.0, night: 10.0 },
            pressure: 1013.0,
            humidity: 50,
            speed: 3.2,
            weather: vec![Condition {
                main: "Clouds".into(),
                description: "scattered clouds".into(),
                icon: "03d".into(),
            }],
        }
    }

    #[test]
    fn unit_system_as_str_roundtrip() {
        for unit in UnitSystem::all() {
            let parsed = UnitSystem::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn week_skips_today_and_keeps_order() {
        let forecast = Forecast {
            city: City { name: "Seattle".into(), country: "US".into() },
            days: (0..7).map(|i| day(1_700_000_000 + i * 86_400)).collect(),
        };

        let week = forecast.week();
        assert_eq!(week.len(), 6);
        assert_eq!(week[0].dt, forecast.days[1].dt);
        assert_eq!(week[5].dt, forecast.days[6].dt);
        assert_eq!(forecast.today().dt, forecast.days[0].dt);
    }

    #[test]
    fn week_is_empty_for_single_day() {
        let forecast = Forecast {
            city: City { name: "Seattle".into(), country: "US".into() },
            days: vec![day(1_700_000_000)],
        };
        assert!(forecast.week().is_empty());
    }

    #[test]
    fn icon_url_template() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d.png");
    }
}
