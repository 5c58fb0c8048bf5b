//! Dashboard command implementation
//!
//! Mounts the terminal UI, starts the refresh poller and runs the event loop
//! until the user quits. Refresh results, key presses and parameter edits
//! are all handled on this loop, so row state never changes anywhere else.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use price_table::{
    config::Config,
    dashboard::{AppAction, ApplyOutcome, DashboardApp, PriceTable},
    pricing::Parameters,
    refresh::{HttpZoneSource, Poller, RefreshHandle, RefreshUpdate, ZoneSource},
};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Execute the dashboard command
pub async fn execute(cfg: Config, params: Parameters) -> Result<()> {
    let source = Arc::new(HttpZoneSource::from_config(&cfg.source)?);
    let endpoint = source.describe();

    let poller = Poller::new(source, cfg.refresh.interval());
    let table = PriceTable::new(cfg.refresh.sticky_sort);
    let mut app = DashboardApp::new(table, params.clone(), &cfg, endpoint);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Mount: the poller fetches immediately, then on every interval
    let (params_tx, params_rx) = watch::channel(params);
    let (handle, mut updates) = poller.spawn(params_rx);
    info!("Dashboard mounted");

    let result = run_event_loop(&mut terminal, &mut app, &handle, &params_tx, &mut updates);

    // Unmount: stop the timer and drop anything still in flight
    handle.cancel().await;
    info!("Dashboard unmounted");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut DashboardApp,
    handle: &RefreshHandle,
    params_tx: &watch::Sender<Parameters>,
    updates: &mut mpsc::UnboundedReceiver<RefreshUpdate>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.handle_key(key) {
                    AppAction::Quit => return Ok(()),
                    AppAction::Refresh => handle.refresh_now(),
                    AppAction::ParametersChanged => {
                        params_tx.send_replace(app.params.clone());
                    }
                    AppAction::None => {}
                }
            }
        }

        drain_updates(app, updates);
    }
}

/// Apply every refresh result that arrived since the last frame
fn drain_updates(app: &mut DashboardApp, updates: &mut mpsc::UnboundedReceiver<RefreshUpdate>) {
    while let Ok(update) = updates.try_recv() {
        let generation = update.generation;
        match app.apply_refresh(update) {
            ApplyOutcome::Replaced(rows) => debug!(generation, rows, "Applied zone refresh"),
            ApplyOutcome::Failed => debug!(generation, "Kept previous rows after failed fetch"),
            ApplyOutcome::Stale => {}
        }
    }
}
