use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent};
use log::{debug, error, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use busline_core::context::AppContext;
use busline_core::error::SettingsError;
use busline_core::surface::MapSurface;
use busline_output::surface::CanvasSurface;
use busline_output::terminal::{handle_map_key_events, ContentResult, TerminalUI};
use busline_output::ui::{MapContent, MapUIMetadata, Message, Renderer, UserAction};

/// Runs the map in the terminal until the user quits.
///
/// The terminal is restored before returning, also when drawing or reading input fails.
pub fn run_map<R: Renderer>(
    mut context: AppContext<CanvasSurface>,
    metadata: MapUIMetadata,
    renderer: R,
    tick_interval: Duration,
) -> ContentResult<()> {
    if tick_interval.is_zero() {
        return Err(SettingsError::ZeroTickInterval.into());
    }
    context.start()?;
    let mut content = MapContent::new(context.options(), metadata);
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let mut tui = TerminalUI::new(terminal, renderer);
    tui.init()?;

    let result = run_loop(
        &mut content,
        &mut context,
        tick_interval,
        |content, surface| tui.draw_ui(content, surface),
        poll_event,
    );
    finish(result, tui.exit())
}

/// Draws, handles input and ticks until the content stops running or a step fails.
///
/// Input, ticks and drawing share one thread. Input is polled with a timeout that ends
/// when the next tick is due, so a tick is never skipped while keys are being handled.
fn run_loop<D, P>(
    content: &mut MapContent,
    context: &mut AppContext<CanvasSurface>,
    tick_interval: Duration,
    mut draw: D,
    mut poll: P,
) -> ContentResult<()>
where
    D: FnMut(&MapContent, &CanvasSurface) -> ContentResult<()>,
    P: FnMut(Duration) -> ContentResult<Option<Message>>,
{
    let mut next_tick = Instant::now() + tick_interval;
    while content.running {
        draw(&*content, context.surface())?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(message) = poll(timeout)? {
            handle_message(message, content, context);
        }

        if Instant::now() >= next_tick {
            context.tick();
            content.update_ticks(context.ticks());
            next_tick += tick_interval;
        }
    }
    info!("Stopped after {} ticks", context.ticks());
    Ok(())
}

/// Combines the outcome of the loop with the terminal restore. A loop error wins.
fn finish(result: ContentResult<()>, exit: ContentResult<()>) -> ContentResult<()> {
    if let Err(e) = &exit {
        error!("Failed to restore the terminal: {}", e);
    }
    result.and(exit)
}

/// Runs the animation without a terminal for a fixed number of ticks.
pub fn run_headless<S: MapSurface>(context: &mut AppContext<S>, ticks: u64) -> ContentResult<()> {
    context.start()?;
    for _ in 0..ticks {
        context.tick();
    }
    for bus in context.buses() {
        info!(
            "Bus on {} at {} on segment {} heading {:.1}",
            bus.route_name(),
            bus.position(),
            bus.vehicle().segment(),
            bus.heading()
        );
    }
    Ok(())
}

fn handle_message(
    message: Message,
    content: &mut MapContent,
    context: &mut AppContext<CanvasSurface>,
) {
    match message {
        Message::Key(key_event) => {
            if let Some(action) = handle_map_key_events(key_event, content) {
                apply_action(action, content, context);
            }
        }
        Message::Mouse(_) => {}
        Message::Resize(w, h) => debug!("Terminal resized to {}x{}", w, h),
    }
}

fn apply_action(
    action: UserAction,
    content: &mut MapContent,
    context: &mut AppContext<CanvasSurface>,
) {
    match action {
        UserAction::Select(selection) => match context.select(selection) {
            Ok(()) => content.status = None,
            Err(e) => {
                error!("Selection failed: {}", e);
                content.status = Some(e.to_string());
            }
        },
        UserAction::Reinitialize => match context.reinitialize() {
            Ok(()) => content.status = None,
            Err(e) => {
                error!("Restarting the buses failed: {}", e);
                content.status = Some(e.to_string());
            }
        },
        UserAction::Zoom(delta) => context.surface_mut().zoom_by(delta),
    }
}

pub fn poll_event(timeout: Duration) -> ContentResult<Option<Message>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let message = match event::read()? {
        CrosstermEvent::Key(e) => Some(Message::Key(e)),
        CrosstermEvent::Mouse(e) => Some(Message::Mouse(e)),
        CrosstermEvent::Resize(w, h) => Some(Message::Resize(w, h)),
        CrosstermEvent::FocusGained => None,
        CrosstermEvent::FocusLost => None,
        CrosstermEvent::Paste(_) => None,
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use busline_core::controller::SelectionController;
    use busline_testutils::context::{initial_view, make_animator, make_catalog, make_context};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn make_canvas_context() -> AppContext<CanvasSurface> {
        let mut context = AppContext::builder()
            .surface(CanvasSurface::builder().view(initial_view()).build())
            .catalog(make_catalog())
            .animator(make_animator(0.01))
            .controller(SelectionController::new(initial_view()))
            .build();
        context.start().expect("start");
        context
    }

    #[test]
    fn test_headless_run() {
        let mut context = make_context(make_catalog(), 0.01);
        run_headless(&mut context, 5).expect("headless run");
        assert_eq!(context.ticks(), 5);
        assert_eq!(context.buses().len(), 2);
        assert_eq!(context.surface().line_count(), 2);
    }

    #[test]
    fn test_headless_run_rejects_invalid_speed() {
        let mut context = make_context(make_catalog(), 0.0);
        assert!(run_headless(&mut context, 5).is_err());
        assert_eq!(context.ticks(), 0);
    }

    #[test]
    fn test_loop_stops_on_quit_key() {
        let mut context = make_canvas_context();
        let mut content = MapContent::new(context.options(), MapUIMetadata::default());
        let draws = Cell::new(0);
        let result = run_loop(
            &mut content,
            &mut context,
            Duration::from_millis(1),
            |_, _| {
                draws.set(draws.get() + 1);
                Ok(())
            },
            |_| {
                Ok(Some(Message::Key(KeyEvent::new(
                    KeyCode::Char('q'),
                    KeyModifiers::NONE,
                ))))
            },
        );
        assert!(result.is_ok());
        assert!(!content.running);
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn test_loop_error_still_restores_terminal() {
        let mut context = make_canvas_context();
        let mut content = MapContent::new(context.options(), MapUIMetadata::default());
        let polls = Cell::new(0);
        let restored = Cell::new(false);
        let result = run_loop(
            &mut content,
            &mut context,
            Duration::from_millis(1),
            |_, _| Ok(()),
            |_| {
                polls.set(polls.get() + 1);
                if polls.get() < 3 {
                    Ok(None)
                } else {
                    Err("input closed".into())
                }
            },
        );
        let outcome = finish(result, {
            restored.set(true);
            Ok(())
        });

        assert!(restored.get());
        assert_eq!(polls.get(), 3);
        assert_eq!(outcome.map_err(|e| e.to_string()), Err("input closed".to_owned()));
        assert!(content.running);
    }

    #[test]
    fn test_restore_failure_is_reported() {
        let outcome = finish(Ok(()), Err("terminal gone".into()));
        assert_eq!(outcome.map_err(|e| e.to_string()), Err("terminal gone".to_owned()));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let context = make_canvas_context();
        let result = run_map(
            context,
            MapUIMetadata::default(),
            NoRenderer,
            Duration::ZERO,
        );
        assert_eq!(
            result.map_err(|e| e.to_string()),
            Err(SettingsError::ZeroTickInterval.to_string())
        );
    }

    struct NoRenderer;

    impl Renderer for NoRenderer {
        fn render_map_ui(&self, _: &MapContent, _: &CanvasSurface, _: &mut ratatui::Frame) {}
    }
}
