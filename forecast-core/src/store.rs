use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tokio::sync::watch;

use crate::model::{FavoriteCity, UnitSystem};

/// On-disk shape of the store: the unit preference and the saved
/// cities, insertion-ordered.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredState {
    #[serde(default)]
    unit: UnitSystem,
    #[serde(default)]
    favorites: Vec<FavoriteCity>,
}

/// Persisted favorites and unit preference.
///
/// Observers get a full snapshot whenever the underlying collection
/// changes; a snapshot equal to the previous one is suppressed, so
/// inserting an already-saved city emits nothing. Mutations are
/// best-effort: storage failures are logged, not returned, and the
/// in-memory snapshot stays authoritative for the session.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: watch::Sender<Vec<FavoriteCity>>,
    unit: watch::Sender<UnitSystem>,
}

impl FavoritesStore {
    /// Open the store at the platform data path, creating an empty one
    /// on first run.
    pub fn open() -> Result<Self> {
        Self::load(Self::data_file_path()?)
    }

    /// Open the store backed by `path`. A missing file yields defaults
    /// (no favorites, metric units).
    pub fn load(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read favorites file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse favorites file: {}", path.display()))?
        } else {
            StoredState::default()
        };

        let (favorites, _) = watch::channel(state.favorites);
        let (unit, _) = watch::channel(state.unit);

        Ok(Self { path, favorites, unit })
    }

    /// Path to the favorites file.
    pub fn data_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-app", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("favorites.toml"))
    }

    /// Live view of the saved cities. Each change delivers a new full
    /// snapshot; identical consecutive snapshots are suppressed.
    pub fn observe_favorites(&self) -> watch::Receiver<Vec<FavoriteCity>> {
        self.favorites.subscribe()
    }

    /// Current favorites snapshot.
    pub fn favorites(&self) -> Vec<FavoriteCity> {
        self.favorites.borrow().clone()
    }

    /// Live view of the unit preference, same snapshot contract as
    /// [`observe_favorites`](Self::observe_favorites).
    pub fn observe_unit(&self) -> watch::Receiver<UnitSystem> {
        self.unit.subscribe()
    }

    pub fn unit(&self) -> UnitSystem {
        *self.unit.borrow()
    }

    /// Save a city. Appending an already-saved identity is a no-op and
    /// emits nothing.
    pub fn insert_favorite(&self, favorite: FavoriteCity) {
        let modified = self.favorites.send_if_modified(|favorites| {
            if favorites.iter().any(|f| f.same_identity(&favorite)) {
                return false;
            }
            favorites.push(favorite.clone());
            true
        });

        if modified {
            self.persist();
        }
    }

    /// Replace the stored entry with the same identity, keeping its
    /// position. Unknown identities are ignored.
    pub fn update_favorite(&self, favorite: FavoriteCity) {
        let modified = self.favorites.send_if_modified(|favorites| {
            match favorites.iter_mut().find(|f| f.same_identity(&favorite)) {
                Some(existing) if *existing != favorite => {
                    *existing = favorite.clone();
                    true
                }
                Some(_) => false,
                None => {
                    tracing::debug!(?favorite, "update for unknown favorite ignored");
                    false
                }
            }
        });

        if modified {
            self.persist();
        }
    }

    /// Remove a saved city. Removing an unknown identity is a no-op.
    pub fn delete_favorite(&self, favorite: &FavoriteCity) {
        let modified = self.favorites.send_if_modified(|favorites| {
            let before = favorites.len();
            favorites.retain(|f| !f.same_identity(favorite));
            favorites.len() != before
        });

        if modified {
            self.persist();
        }
    }

    /// Persist a new unit preference. Re-setting the current value
    /// emits nothing.
    pub fn set_unit(&self, unit: UnitSystem) {
        let modified = self.unit.send_if_modified(|current| {
            if *current == unit {
                return false;
            }
            *current = unit;
            true
        });

        if modified {
            self.persist();
        }
    }

    /// Write the current snapshot to disk. Failures are logged and
    /// swallowed; callers treat mutations as fire-and-forget.
    fn persist(&self) {
        let state = StoredState {
            unit: *self.unit.borrow(),
            favorites: self.favorites.borrow().clone(),
        };

        if let Err(err) = self.write_state(&state) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist favorites");
        }
    }

    fn write_state(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(state)
            .context("Failed to serialize favorites to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))?;

        Ok(())
    }
}
