use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::domain::weather::{Units, WeatherBundle};
use crate::error::SessionError;

/// Everything that can advance the session. User intents and timer ticks
/// funnel through the same channel as fetch settlements, so all state
/// mutation happens on the event loop.
#[derive(Debug)]
pub enum SessionEvent {
    Bootstrap,
    TickRefresh,
    SubmitCity(String),
    ChangeUnits(Units),
    ManualRefresh,
    CycleSettled {
        cycle: u64,
        outcome: Result<WeatherBundle, SessionError>,
    },
    Quit,
}

/// Periodic refresh task owned by the session lifecycle. The tick interval
/// carries a small jitter around the configured period; the task is aborted
/// when the timer is cancelled or dropped.
#[derive(Debug)]
pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    pub fn start(tx: mpsc::Sender<SessionEvent>, interval_secs: u64) -> Self {
        let handle = tokio::spawn(async move {
            let base = interval_secs.max(10);
            loop {
                let wait_secs = {
                    let mut rng = rand::rng();
                    let jitter = rng.random_range(-0.05f32..0.05f32);
                    ((base as f32) * (1.0 + jitter)).max(1.0)
                };
                sleep(Duration::from_secs_f32(wait_secs)).await;
                if tx.send(SessionEvent::TickRefresh).await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stops_ticking() {
        let (tx, mut rx) = mpsc::channel(4);
        let timer = RefreshTimer::start(tx, 600);
        timer.cancel();

        // The first tick would land around the 10-minute mark; after the
        // abort the channel must stay silent well past it.
        tokio::time::advance(Duration::from_secs(1_200)).await;
        assert!(rx.try_recv().is_err());
    }
}
