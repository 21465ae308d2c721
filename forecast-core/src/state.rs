use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::client::ForecastSource;
use crate::error::FetchError;
use crate::model::{Forecast, UnitSystem};

/// Observable state of one fetch. A fetch is either still running or
/// has settled into exactly one of `Loaded`/`Failed`; a payload and a
/// failure cause can never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// The payload, when this fetch settled successfully.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Per-screen owner of the forecast state. One instance per screen,
/// sole mutator of its own state; dropping it (screen teardown) closes
/// the channel for all subscribers.
///
/// Starting a new fetch supersedes any fetch still in flight: the
/// superseded fetch's result is discarded when it eventually arrives,
/// so a slow response can never overwrite the state of a later fetch.
#[derive(Debug)]
pub struct ForecastController {
    source: Arc<dyn ForecastSource>,
    state: watch::Sender<FetchState<Forecast>>,
    /// Guards epoch bump + `Loading` publish and epoch check +
    /// terminal publish as single steps, so a settled fetch can never
    /// pass the staleness check and then publish after a newer fetch
    /// has already taken over the channel.
    epoch: Mutex<u64>,
}

impl ForecastController {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        Self { source, state, epoch: Mutex::new(0) }
    }

    /// Observable view of the screen's state. Receivers see `Loading`
    /// whenever a fetch starts and the terminal state once it settles.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Forecast>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> FetchState<Forecast> {
        self.state.borrow().clone()
    }

    /// Fetch the forecast for `city`, publishing `Loading` immediately
    /// and the settled state once the source answers. Returns this
    /// call's settled state; if a newer `load_forecast` started in the
    /// meantime, the shared state is left untouched by this call.
    pub async fn load_forecast(&self, city: &str, unit: UnitSystem) -> FetchState<Forecast> {
        let epoch = {
            let mut current = self.lock_epoch();
            *current += 1;
            self.state.send_replace(FetchState::Loading);
            *current
        };

        let settled = match self.source.fetch_forecast(city, unit).await {
            Ok(forecast) => FetchState::Loaded(forecast),
            Err(err) => FetchState::Failed(err),
        };

        {
            let current = self.lock_epoch();
            if *current == epoch {
                self.state.send_replace(settled.clone());
            } else {
                tracing::debug!(city, "discarding superseded forecast result");
            }
        }

        settled
    }

    fn lock_epoch(&self) -> std::sync::MutexGuard<'_, u64> {
        self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
