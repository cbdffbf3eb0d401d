pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod ui;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use app::events::{RefreshTimer, SessionEvent};
use app::session::{SessionPhase, SessionState};
use app::view::derive_view;
use cli::Cli;
use domain::weather::Units;

/// Runs one weather session: bootstrap fetch, periodic refresh, and (in
/// interactive mode) line-oriented commands from stdin. The refresh timer
/// lives exactly as long as the loop.
pub async fn run(cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<SessionEvent>(256);
    let mut session = SessionState::new(&cli);
    let timer = RefreshTimer::start(tx.clone(), cli.refresh_interval);
    let mut input = stdin_lines();
    let mut stdout = std::io::stdout();

    tx.send(SessionEvent::Bootstrap).await?;

    while session.running {
        tokio::select! {
            maybe_line = input.next_line(), if !cli.one_shot => {
                match maybe_line? {
                    Some(line) => dispatch_command(&tx, &line).await?,
                    None => tx.send(SessionEvent::Quit).await?,
                }
            }
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else { break };
                session.handle_event(event, &tx);
                if !cli.one_shot {
                    ui::render(&mut stdout, &derive_view(&session))?;
                }
            }
        }

        if cli.one_shot
            && matches!(session.phase, SessionPhase::Ready | SessionPhase::Failed)
        {
            session.running = false;
        }
    }

    timer.cancel();

    if cli.one_shot {
        if let Some(err) = session.error.take() {
            anyhow::bail!(err);
        }
        ui::render(&mut stdout, &derive_view(&session))?;
    }
    Ok(())
}

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Maps one input line to a session event. Anything that is not a command
/// is a city submission, including the empty string (which the controller
/// rejects as invalid input).
async fn dispatch_command(tx: &mpsc::Sender<SessionEvent>, line: &str) -> Result<()> {
    let event = match line.trim() {
        ":q" | ":quit" => SessionEvent::Quit,
        ":r" | ":refresh" => SessionEvent::ManualRefresh,
        ":metric" => SessionEvent::ChangeUnits(Units::Metric),
        ":imperial" => SessionEvent::ChangeUnits(Units::Imperial),
        other => SessionEvent::SubmitCity(other.to_string()),
    };
    tx.send(event).await?;
    Ok(())
}
