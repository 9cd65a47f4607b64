use std::io;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::app::App;
use crate::ui;

mod event;
mod key_handler;
pub mod mode;
mod mouse_handler;
mod terminal;

pub(crate) type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum EventResult {
    Continue,
    Quit,
}

/// Runs the TUI event/render loop until the user exits.
///
/// # Errors
/// Returns an error if terminal setup, rendering, or event processing fails.
pub async fn run(app: &mut App) -> io::Result<()> {
    let _terminal_guard = terminal::TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;

    // Crossterm reads block, so they run on a dedicated thread and the main
    // async loop keeps yielding to spawned backend calls.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(event_tx);

    let mut tick = tokio::time::interval(Duration::from_millis(50));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    app.start();
    run_main_loop(app, &mut terminal, &mut event_rx, &mut tick).await?;

    terminal.show_cursor()?;

    Ok(())
}

async fn run_main_loop(
    app: &mut App,
    terminal: &mut TuiTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<crossterm::event::Event>,
    tick: &mut tokio::time::Interval,
) -> io::Result<()> {
    loop {
        app.sync_grid();
        render_frame(app, terminal)?;

        if event::process_events(app, event_rx, tick).await == EventResult::Quit {
            break;
        }
    }

    Ok(())
}

fn render_frame(app: &mut App, terminal: &mut TuiTerminal) -> io::Result<()> {
    let view = app.coordinator.view();

    terminal.draw(|frame| {
        app.viewport = frame.area();
        ui::render(
            frame,
            ui::RenderContext {
                focus: app.focus,
                grid_state: &mut app.grid.table_state,
                notice: app.notice.as_ref(),
                overlay: &app.overlay,
                path_bar: &app.path_bar,
                prompt: app.prompts.active(),
                search: &app.search,
                sidebar: &app.sidebar,
                view: &view,
            },
        );
    })?;

    Ok(())
}
