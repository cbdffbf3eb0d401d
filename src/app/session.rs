use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::app::events::SessionEvent;
use crate::cli::Cli;
use crate::data::openweather::WeatherClient;
use crate::domain::weather::{CurrentConditions, ForecastSeries, Units, WeatherBundle};
use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// The session's single source of truth. Only [`SessionState::handle_event`]
/// mutates it, and only on the event-loop task.
#[derive(Debug)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub running: bool,
    pub city: String,
    pub units: Units,
    pub current: Option<CurrentConditions>,
    pub forecast: Option<ForecastSeries>,
    pub loading: bool,
    pub error: Option<SessionError>,
    pub last_updated_at: Option<DateTime<Utc>>,
    api_key: Option<String>,
    client: WeatherClient,
    /// Token of the most recently issued cycle. A settlement commits only
    /// if it carries this value; anything older lost the race and is
    /// discarded (last writer wins).
    cycle: u64,
}

impl SessionState {
    #[must_use]
    pub fn new(cli: &Cli) -> Self {
        let client = match cli.api_url.as_deref() {
            Some(base) => WeatherClient::with_base_url(base, cli.lang.clone()),
            None => WeatherClient::new(cli.lang.clone()),
        };

        Self {
            phase: SessionPhase::Idle,
            running: true,
            city: cli.default_city(),
            units: cli.units.into(),
            current: None,
            forecast: None,
            loading: false,
            error: None,
            last_updated_at: None,
            api_key: cli.resolve_api_key(),
            client,
            cycle: 0,
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent, tx: &mpsc::Sender<SessionEvent>) {
        match event {
            SessionEvent::Bootstrap | SessionEvent::TickRefresh => self.begin_cycle(tx),
            SessionEvent::ManualRefresh => self.refresh(tx),
            SessionEvent::SubmitCity(raw) => self.submit_city(&raw, tx),
            SessionEvent::ChangeUnits(units) => self.change_units(units, tx),
            SessionEvent::CycleSettled { cycle, outcome } => self.settle_cycle(cycle, outcome),
            SessionEvent::Quit => self.running = false,
        }
    }

    /// Commits a trimmed non-empty city and fetches for it; empty input is
    /// the invalid-location error and never reaches the network.
    pub fn submit_city(&mut self, raw: &str, tx: &mpsc::Sender<SessionEvent>) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.fail_precondition(SessionError::InvalidLocationInput);
            return;
        }
        self.city = trimmed.to_string();
        self.begin_cycle(tx);
    }

    pub fn change_units(&mut self, units: Units, tx: &mpsc::Sender<SessionEvent>) {
        self.units = units;
        self.begin_cycle(tx);
    }

    pub fn refresh(&mut self, tx: &mpsc::Sender<SessionEvent>) {
        self.begin_cycle(tx);
    }

    /// Single entry point for every trigger. Checks preconditions, stamps a
    /// fresh cycle token and dispatches the paired fetch; the spawned task
    /// reports back through the channel with that token.
    pub fn begin_cycle(&mut self, tx: &mpsc::Sender<SessionEvent>) {
        let Some(api_key) = self.api_key.clone() else {
            self.fail_precondition(SessionError::MissingCredential);
            return;
        };
        let city = self.city.trim().to_string();
        if city.is_empty() {
            self.fail_precondition(SessionError::InvalidLocationInput);
            return;
        }

        self.cycle += 1;
        let cycle = self.cycle;
        self.loading = true;
        self.error = None;
        if self.current.is_none() {
            self.phase = SessionPhase::Loading;
        }

        let client = self.client.clone();
        let units = self.units;
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch_bundle(&city, units, &api_key).await;
            let _ = tx.send(SessionEvent::CycleSettled { cycle, outcome }).await;
        });
    }

    fn settle_cycle(&mut self, cycle: u64, outcome: Result<WeatherBundle, SessionError>) {
        if cycle != self.cycle {
            // A newer cycle superseded this one while it was in flight.
            return;
        }

        self.loading = false;
        match outcome {
            Ok(bundle) => {
                self.current = Some(bundle.current);
                self.forecast = Some(bundle.forecast);
                self.error = None;
                self.last_updated_at = Some(Utc::now());
                self.phase = SessionPhase::Ready;
            }
            Err(err) => {
                self.current = None;
                self.forecast = None;
                self.error = Some(err);
                self.phase = SessionPhase::Failed;
            }
        }
    }

    /// A precondition failure is not a settled cycle: it reports the error
    /// and leaves previously committed data and `last_updated_at` alone.
    fn fail_precondition(&mut self, err: SessionError) {
        self.loading = false;
        self.error = Some(err);
        self.phase = SessionPhase::Failed;
    }
}
