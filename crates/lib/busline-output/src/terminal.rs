use std::{error, io};
use std::panic;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::surface::CanvasSurface;
use crate::ui::{MapContent, Renderer, UserAction};

pub type ContentResult<T> = Result<T, Box<dyn error::Error>>;

pub const ZOOM_STEP: f64 = 1.0;

/// Representation of a terminal user interface.
///
/// It is responsible for setting up the terminal,
/// initializing the interface and handling the draw events.
#[derive(Debug)]
pub struct TerminalUI<B: Backend, R: Renderer> {
    /// Interface to the Terminal.
    terminal: Terminal<B>,
    renderer: R,
}

impl<B: Backend, R: Renderer> TerminalUI<B, R> {
    /// Constructs a new instance of [`TerminalUI`].
    pub fn new(terminal: Terminal<B>, renderer: R) -> Self {
        Self { terminal, renderer }
    }

    /// Initializes the terminal interface.
    ///
    /// It enables the raw mode and sets terminal properties.
    pub fn init(&mut self) -> ContentResult<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

        // Restore the terminal before the panic message is printed.
        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic| {
            if let Err(e) = reset_terminal() {
                eprintln!("failed to reset the terminal: {}", e);
            }
            panic_hook(panic);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// [`Draw`] the terminal interface by rendering the map and the selector.
    ///
    /// [`Draw`]: ratatui::Terminal::draw
    pub fn draw_ui(&mut self, content: &MapContent, surface: &CanvasSurface) -> ContentResult<()> {
        self.terminal
            .draw(|frame| self.renderer.render_map_ui(content, surface, frame))?;
        Ok(())
    }

    /// Exits the terminal interface.
    ///
    /// It disables the raw mode and reverts back the terminal properties.
    pub fn exit(&mut self) -> ContentResult<()> {
        reset_terminal()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Resets the terminal interface.
///
/// This function is also used for the panic hook to revert
/// the terminal properties if unexpected errors occur.
fn reset_terminal() -> ContentResult<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Handles the key events, updating the selector in [`MapContent`] and returning what
/// the map has to do, if anything.
pub fn handle_map_key_events(key_event: KeyEvent, content: &mut MapContent) -> Option<UserAction> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            content.quit();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            content.highlight_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            content.highlight_next();
            None
        }
        KeyCode::Enter => content.apply_highlighted().map(UserAction::Select),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let index = c.to_digit(10)? as usize;
            content.apply_index(index).map(UserAction::Select)
        }
        KeyCode::Char('r') => Some(UserAction::Reinitialize),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UserAction::Zoom(ZOOM_STEP)),
        KeyCode::Char('-') => Some(UserAction::Zoom(-ZOOM_STEP)),
        _ => None,
    }
}
