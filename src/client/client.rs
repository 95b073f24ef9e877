//! Polling client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::Mutex;
use tokio::time::{self, MissedTickBehavior};

use crate::protocol::POLL_INTERVAL_MS;
use crate::terminal;

use super::api::{HttpVoteApi, VoteApi};
use super::dispatcher::{Action, ActionDispatcher};
use super::fetcher::StateFetcher;
use super::state::{ClientApp, Focus};
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://127.0.0.1:8000`.
    pub server: String,
    /// First name to pre-fill.
    pub name: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Services shared by the background tasks.
#[derive(Clone)]
struct Services {
    app: SharedApp,
    fetcher: Arc<StateFetcher>,
    dispatcher: Arc<ActionDispatcher>,
}

/// What a key press asks the runtime to do.
#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    None,
    Quit,
    Dispatch { first_name: String, action: Action },
}

/// Run the vote client.
pub async fn run(config: ClientConfig) -> crate::Result<()> {
    let api: Arc<dyn VoteApi> = Arc::new(HttpVoteApi::new(&config.server, config.timeout)?);
    tracing::info!(server = %config.server, "starting client");

    let services = Services {
        app: Arc::new(Mutex::new(ClientApp::new(config.server, config.name))),
        fetcher: Arc::new(StateFetcher::new(Arc::clone(&api))),
        dispatcher: Arc::new(ActionDispatcher::new(api)),
    };

    let poll_task = tokio::spawn(poll(services.clone()));

    let result = run_tui(&services).await;

    poll_task.abort();
    result
}

/// Refresh immediately, then every poll interval.
async fn poll(services: Services) {
    let mut interval = time::interval(Duration::from_millis(POLL_INTERVAL_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        // Each refresh runs on its own; a slow one must not delay the next tick.
        let services = services.clone();
        tokio::spawn(async move { refresh(&services).await });
    }
}

async fn refresh(services: &Services) {
    let snapshot = services.fetcher.refresh_state().await;
    services.app.lock().await.apply_snapshot(snapshot);
}

/// Send an action, report its error and refresh as the action requires.
async fn perform(services: Services, first_name: String, action: Action) {
    let result = services.dispatcher.dispatch(&first_name, &action).await;

    if let Err(e) = &result {
        tracing::warn!(action = action.name(), error = %e, "action failed");
        services.app.lock().await.set_notice(e.to_string());
    }

    if action.refresh_after(&result) {
        refresh(&services).await;
    }
}

/// Run the client TUI.
async fn run_tui(services: &Services) -> crate::Result<()> {
    let mut terminal = terminal::init()?;
    let result = event_loop(&mut terminal, services).await;
    terminal::restore()?;
    result
}

async fn event_loop(terminal: &mut terminal::AppTerminal, services: &Services) -> crate::Result<()> {
    loop {
        // Render UI
        {
            let app = services.app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // Handle input with timeout so background refreshes get drawn
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let outcome = {
                    let mut app = services.app.lock().await;
                    handle_key(&mut app, key.code)
                };

                match outcome {
                    KeyOutcome::None => {}
                    KeyOutcome::Quit => break,
                    KeyOutcome::Dispatch { first_name, action } => {
                        tokio::spawn(perform(services.clone(), first_name, action));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Handle keyboard input.
fn handle_key(app: &mut ClientApp, key: KeyCode) -> KeyOutcome {
    app.clear_notice();

    if key == KeyCode::Tab {
        app.toggle_focus();
        return KeyOutcome::None;
    }

    match app.focus {
        Focus::Name => match key {
            KeyCode::Char(c) => {
                app.name_input_push(c);
                KeyOutcome::None
            }
            KeyCode::Backspace => {
                app.name_input_pop();
                KeyOutcome::None
            }
            KeyCode::Enter => dispatch(app, Action::Register),
            KeyCode::Esc => quit(app),
            _ => KeyOutcome::None,
        },
        Focus::Cards => match key {
            KeyCode::Left | KeyCode::Char('h') => {
                app.select_previous_card();
                KeyOutcome::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.select_next_card();
                KeyOutcome::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let vote = app.selected_vote().to_string();
                dispatch(app, Action::Vote(vote))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => dispatch(app, Action::Reveal),
            KeyCode::Char('x') | KeyCode::Char('X') => dispatch(app, Action::Reset),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => quit(app),
            _ => KeyOutcome::None,
        },
    }
}

fn dispatch(app: &ClientApp, action: Action) -> KeyOutcome {
    KeyOutcome::Dispatch {
        first_name: app.name_input().trim().to_string(),
        action,
    }
}

fn quit(app: &mut ClientApp) -> KeyOutcome {
    app.should_quit = true;
    KeyOutcome::Quit
}
