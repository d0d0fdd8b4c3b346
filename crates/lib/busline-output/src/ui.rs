use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;

use busline_core::selection::{Selection, SelectorOption};

use crate::surface::CanvasSurface;

#[derive(Clone, Copy, Debug)]
pub enum Message {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// What a key press asks the map to do.
#[derive(Clone, Debug, PartialEq)]
pub enum UserAction {
    Select(Selection),
    Reinitialize,
    Zoom(f64),
}

#[derive(Debug, Clone, Default)]
pub struct MapUIMetadata {
    pub scenario: String,
    pub input_file: String,
    pub log_path: String,
    /// Marker artwork, shown next to the map for reference.
    pub icon: String,
}

/// State of the interface around the map: the route selector and the status line.
#[derive(Debug, Default)]
pub struct MapContent {
    pub running: bool,
    pub ticks: u64,
    pub metadata: MapUIMetadata,
    pub options: Vec<SelectorOption>,
    /// Entry under the cursor in the selector.
    pub highlighted: usize,
    /// Entry whose selection is in effect.
    pub applied: usize,
    pub status: Option<String>,
}

impl MapContent {
    pub fn new(options: Vec<SelectorOption>, metadata: MapUIMetadata) -> Self {
        Self {
            running: true,
            options,
            metadata,
            ..Self::default()
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn update_ticks(&mut self, ticks: u64) {
        self.ticks = ticks;
    }

    pub fn highlight_next(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn highlight_previous(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + self.options.len() - 1) % self.options.len();
        }
    }

    /// Applies the highlighted entry and returns its selection.
    pub fn apply_highlighted(&mut self) -> Option<Selection> {
        let option = self.options.get(self.highlighted)?;
        self.applied = self.highlighted;
        Some(option.value.clone())
    }

    /// Highlights and applies the entry at `index`.
    pub fn apply_index(&mut self, index: usize) -> Option<Selection> {
        if index >= self.options.len() {
            return None;
        }
        self.highlighted = index;
        self.apply_highlighted()
    }

    pub fn applied_label(&self) -> &str {
        self.options
            .get(self.applied)
            .map(|option| option.label.as_str())
            .unwrap_or_default()
    }
}

pub trait Renderer {
    fn render_map_ui(&self, content: &MapContent, surface: &CanvasSurface, frame: &mut Frame);
}

#[cfg(test)]
mod tests {
    use busline_core::route::RouteCatalog;
    use busline_core::selection::selector_options;

    use super::*;

    #[test]
    fn test_highlight_wraps() {
        let options = selector_options(&RouteCatalog::bangalore());
        let mut content = MapContent::new(options, MapUIMetadata::default());
        content.highlight_previous();
        assert_eq!(content.highlighted, 3);
        content.highlight_next();
        assert_eq!(content.highlighted, 0);
    }

    #[test]
    fn test_apply_index() {
        let options = selector_options(&RouteCatalog::bangalore());
        let mut content = MapContent::new(options, MapUIMetadata::default());
        assert_eq!(content.apply_index(7), None);
        let selection = content.apply_index(1).expect("valid index");
        assert_eq!(selection.to_string(), "Route-1");
        assert_eq!(content.applied_label(), "Route-1");
    }
}
