use itertools::Itertools;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line, Map, MapResolution};
use ratatui::widgets::{Borders, List, ListItem, ListState};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use busline_core::route::RouteColor;
use busline_output::surface::CanvasSurface;
use busline_output::ui::{MapContent, Renderer};

pub struct MapRenderer {}

impl MapRenderer {
    pub fn new() -> Self {
        Self {}
    }
}

pub(crate) fn to_color(color: RouteColor, opacity: f64) -> Color {
    let faded = opacity < 1.0;
    match (color, faded) {
        (RouteColor::Blue, false) => Color::LightBlue,
        (RouteColor::Blue, true) => Color::Blue,
        (RouteColor::Red, false) => Color::LightRed,
        (RouteColor::Red, true) => Color::Red,
        (RouteColor::Green, false) => Color::LightGreen,
        (RouteColor::Green, true) => Color::Green,
        (RouteColor::Yellow, false) => Color::LightYellow,
        (RouteColor::Yellow, true) => Color::Yellow,
        (RouteColor::Magenta, false) => Color::LightMagenta,
        (RouteColor::Magenta, true) => Color::Magenta,
        (RouteColor::Cyan, false) => Color::LightCyan,
        (RouteColor::Cyan, true) => Color::Cyan,
        (RouteColor::White, false) => Color::White,
        (RouteColor::White, true) => Color::Gray,
    }
}

impl MapRenderer {
    fn render_map(&self, surface: &CanvasSurface, frame: &mut Frame, area: Rect) {
        let bounds = surface.view_bounds();
        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .title("busline")
                    .title_alignment(Alignment::Center)
                    .title_bottom(TextLine::from(surface.attribution().to_owned()).right_aligned())
                    .border_type(BorderType::Rounded),
            )
            .marker(Marker::Braille)
            .x_bounds([bounds.south_west.lng, bounds.north_east.lng])
            .y_bounds([bounds.south_west.lat, bounds.north_east.lat])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();

                for (path, style) in surface.lines() {
                    let color = to_color(style.color, style.opacity);
                    for (from, to) in path.iter().tuple_windows() {
                        ctx.draw(&Line::new(from.lng, from.lat, to.lng, to.lat, color));
                    }
                }
                ctx.layer();

                for marker in surface.markers().filter(|m| m.opacity > 0.0) {
                    let position = marker.position;
                    ctx.print(
                        position.lng,
                        position.lat,
                        TextLine::from(vec![
                            Span::styled(
                                marker.glyph(),
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!(" {}", marker.popup),
                                Style::default().fg(Color::White),
                            ),
                        ]),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_selector(&self, content: &MapContent, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = content
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let marker = if index == content.applied { "● " } else { "  " };
                ListItem::new(format!("{}{}. {}", marker, index, option.label))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Routes")
                    .title_alignment(Alignment::Center),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(content.highlighted));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_details(
        &self,
        content: &MapContent,
        surface: &CanvasSurface,
        frame: &mut Frame,
        area: Rect,
    ) {
        let details = format!(
            "Scenario: {}\n\
        Input File: {}\n\
        Log Path: {}\n\
        Icon: {}\n\
        Tiles: {}\n\
        Ticks: {}\n\
        Showing: {}\n\
        {}\n\
        \n\
        ↑/↓ move, Enter select, 0-9 pick\n\
        r restart buses, +/- zoom, q quit",
            content.metadata.scenario,
            content.metadata.input_file,
            content.metadata.log_path,
            content.metadata.icon,
            surface.tiles().url_template,
            content.ticks,
            content.applied_label(),
            content.status.as_deref().unwrap_or_default(),
        );
        frame.render_widget(
            Paragraph::new(details)
                .block(Block::default().borders(Borders::ALL).title("More details"))
                .style(Style::default().fg(Color::White).bg(Color::Black))
                .alignment(Alignment::Left),
            area,
        );
    }
}

impl Renderer for MapRenderer {
    /// Renders the map on the left, the route selector and details on the right.
    fn render_map_ui(&self, content: &MapContent, surface: &CanvasSurface, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(frame.area());
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        self.render_map(surface, frame, columns[0]);
        self.render_selector(content, frame, side[0]);
        self.render_details(content, surface, frame, side[1]);
    }
}

#[cfg(test)]
mod tests {
    use busline_core::geo::LatLng;
    use busline_core::route::RouteCatalog;
    use busline_core::selection::selector_options;
    use busline_core::surface::{MarkerIcon, Viewport};
    use busline_output::ui::MapUIMetadata;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    #[test]
    fn test_faded_colors() {
        assert_eq!(to_color(RouteColor::Blue, 0.7), Color::Blue);
        assert_eq!(to_color(RouteColor::Blue, 1.0), Color::LightBlue);
    }

    #[test]
    fn test_render_shows_selector_and_attribution() {
        let surface = CanvasSurface::builder()
            .view(Viewport {
                center: LatLng::new(12.9716, 77.5946),
                zoom: 12.0,
            })
            .build();
        let metadata = MapUIMetadata {
            icon: MarkerIcon::default().to_string(),
            ..MapUIMetadata::default()
        };
        let content = MapContent::new(selector_options(&RouteCatalog::bangalore()), metadata);
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).expect("terminal");
        terminal
            .draw(|frame| MapRenderer::new().render_map_ui(&content, &surface, frame))
            .expect("draw");

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Show All Routes"));
        assert!(screen.contains("Route-3"));
        assert!(screen.contains("OpenStreetMap"));
        assert!(screen.contains("Icon: bus-icon.svg 38x38"));
        assert!(screen.contains("Tiles: https://{s}.tile"));
    }
}
