//! Update cycle: location in, two fetches, one render or one notice out.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info, instrument, warn};

use crate::{
    display::DisplaySurface,
    error::{GeolocationError, WeatherError},
    geolocation::Geolocator,
    model::{CurrentConditions, ForecastSeries, LocationRef},
    presenter,
    provider::WeatherSource,
};

/// How long an error notice stays up unless replaced.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

#[derive(Debug)]
pub enum UpdateOutcome {
    Rendered,
    Failed(WeatherError),
    /// A newer update started before this one finished; its result was dropped.
    Superseded,
    LocationUnavailable(GeolocationError),
}

impl UpdateOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Owns everything an update touches. Methods take `&self` so overlapping
/// updates can run; only the most recently started one reaches the surface.
pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    surface: Arc<dyn DisplaySurface>,
    generation: AtomicU64,
    notice_seq: Arc<AtomicU64>,
    notice_ttl: Duration,
    clock: Clock,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("source", &self.source)
            .field("generation", &self.generation)
            .field("notice_ttl", &self.notice_ttl)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(source: Arc<dyn WeatherSource>, surface: Arc<dyn DisplaySurface>) -> Self {
        Self {
            source,
            surface,
            generation: AtomicU64::new(0),
            notice_seq: Arc::new(AtomicU64::new(0)),
            notice_ttl: NOTICE_TTL,
            clock: Arc::new(|| Local::now().fixed_offset()),
        }
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Replace the wall clock used for the display date, weekdays and theme hour.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Search box submission. Blank input is ignored.
    pub async fn search(&self, input: &str) -> Option<UpdateOutcome> {
        let place = input.trim();
        if place.is_empty() {
            return None;
        }
        Some(self.update(LocationRef::place(place)).await)
    }

    /// Ask `geolocator` for a position once and update for it.
    ///
    /// The request counts as started when this is called, so a search issued
    /// while the lookup is pending supersedes it.
    pub async fn locate(&self, geolocator: &dyn Geolocator) -> UpdateOutcome {
        let ticket = self.next_ticket();
        self.surface.set_loading(true);

        match geolocator.current_position().await {
            Ok(coordinates) => self.update_with_ticket(ticket, coordinates.into()).await,
            Err(err) => {
                if !self.is_latest(ticket) {
                    debug!(ticket, %err, "discarding stale position lookup failure");
                    return UpdateOutcome::Superseded;
                }
                info!(%err, "position lookup failed");
                self.surface.set_loading(false);
                self.show_notice(&err.user_message());
                UpdateOutcome::LocationUnavailable(err)
            }
        }
    }

    pub async fn update(&self, location: LocationRef) -> UpdateOutcome {
        let ticket = self.next_ticket();
        self.update_with_ticket(ticket, location).await
    }

    #[instrument(skip(self, location), fields(location = %location))]
    async fn update_with_ticket(&self, ticket: u64, location: LocationRef) -> UpdateOutcome {
        // A position can arrive after a newer request already started.
        if !self.is_latest(ticket) {
            debug!(ticket, "skipping update for stale request");
            return UpdateOutcome::Superseded;
        }

        self.surface.set_loading(true);
        self.clear_notice();

        let result = self.fetch_pair(&location).await;

        if !self.is_latest(ticket) {
            debug!(ticket, "discarding stale update");
            return UpdateOutcome::Superseded;
        }

        self.surface.set_loading(false);

        match result {
            Ok((current, forecast)) => {
                let view = presenter::present(&current, &forecast, &(self.clock)());
                self.surface.render(&view);
                UpdateOutcome::Rendered
            }
            Err(err) => {
                warn!(%err, "weather update failed");
                self.show_notice(&err.user_message());
                UpdateOutcome::Failed(err)
            }
        }
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Current first, then forecast; the first failure aborts the pair.
    async fn fetch_pair(
        &self,
        location: &LocationRef,
    ) -> Result<(CurrentConditions, ForecastSeries), WeatherError> {
        let current = self.source.fetch_current(location).await?;
        let forecast = self.source.fetch_forecast(location).await?;
        Ok((current, forecast))
    }

    /// Must be called from within a tokio runtime; expiry runs as a spawned task.
    fn show_notice(&self, message: &str) {
        let id = self.notice_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface.show_notice(message);

        let seq = Arc::clone(&self.notice_seq);
        let surface = Arc::clone(&self.surface);
        let ttl = self.notice_ttl;

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if seq.load(Ordering::SeqCst) == id {
                surface.clear_notice();
            }
        });
    }

    fn clear_notice(&self) {
        self.notice_seq.fetch_add(1, Ordering::SeqCst);
        self.surface.clear_notice();
    }
}
