use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::runtime::{EventResult, key_handler, mouse_handler};

pub(crate) fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

pub(crate) async fn process_events(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    tick: &mut tokio::time::Interval,
) -> EventResult {
    enum LoopSignal {
        App(Option<AppEvent>),
        Terminal(Option<Event>),
        Tick,
    }

    // Wait for a terminal event, an app event from a settled backend call, or
    // the next tick. Awaiting here lets spawned gateway calls make progress.
    let signal = tokio::select! {
        biased;
        event = event_rx.recv() => LoopSignal::Terminal(event),
        app_event = app.next_app_event() => LoopSignal::App(app_event),
        _ = tick.tick() => LoopSignal::Tick,
    };
    let maybe_event = match signal {
        LoopSignal::Terminal(event) => event,
        LoopSignal::App(Some(app_event)) => {
            app.apply_app_events(app_event);

            None
        }
        LoopSignal::App(None) | LoopSignal::Tick => None,
    };

    if process_event(app, maybe_event) == EventResult::Quit {
        return EventResult::Quit;
    }

    // Drain remaining queued events before re-rendering so rapid key
    // presses are processed immediately instead of one-per-frame.
    while let Ok(event) = event_rx.try_recv() {
        if process_event(app, Some(event)) == EventResult::Quit {
            return EventResult::Quit;
        }
    }
    app.process_pending_app_events();

    EventResult::Continue
}

fn process_event(app: &mut App, event: Option<Event>) -> EventResult {
    match event {
        Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            key_handler::handle_key_event(app, key)
        }
        Some(Event::Mouse(mouse)) => {
            mouse_handler::handle_mouse_event(app, mouse);

            EventResult::Continue
        }
        Some(Event::Paste(text)) => {
            key_handler::handle_paste(app, &text);

            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}
