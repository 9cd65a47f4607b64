use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::domain::view::ExplorerView;
use crate::ui::Component;
use crate::ui::layout;
use crate::ui::state::focus::PathBarState;
use crate::ui::util::{display_width, visible_input};

/// Label of the filesystem root breadcrumb.
pub const ROOT_LABEL: &str = "/";
const SEPARATOR: &str = " › ";

/// Breadcrumb strip, or a text editor while the path bar is being edited.
pub struct PathBar<'a> {
    snapshot: Option<&'a ExplorerView>,
    state: &'a PathBarState,
}

impl<'a> PathBar<'a> {
    pub fn new(snapshot: Option<&'a ExplorerView>, state: &'a PathBarState) -> Self {
        Self { snapshot, state }
    }

    fn breadcrumb_line(&self) -> Line<'static> {
        let Some(snapshot) = self.snapshot else {
            return Line::from(Span::styled("...", Style::default().fg(Color::DarkGray)));
        };

        let segments = breadcrumb_segments(snapshot);
        let last_index = segments.len().saturating_sub(1);
        let mut spans = Vec::with_capacity(segments.len() * 2);
        for (index, (label, _)) in segments.into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }

            let style = if index == last_index {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            spans.push(Span::styled(label, style));
        }

        Line::from(spans)
    }
}

impl Component for PathBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let inner = layout::inner(area);

        match self.state {
            PathBarState::Breadcrumbs => {
                let paragraph = Paragraph::new(self.breadcrumb_line()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
                f.render_widget(paragraph, area);
            }
            PathBarState::Editing(input) => {
                let (visible, cursor_column) = visible_input(input, inner.width);
                let paragraph = Paragraph::new(visible).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(Span::styled(
                            " Go to (Enter: open, Esc: cancel) ",
                            Style::default().fg(Color::Yellow),
                        )),
                );
                f.render_widget(paragraph, area);
                f.set_cursor_position((inner.x.saturating_add(cursor_column), inner.y));
            }
        }
    }
}

/// Returns the breadcrumb segments of `view`, root first, each paired with
/// the absolute path it opens.
pub fn breadcrumb_segments(view: &ExplorerView) -> Vec<(String, String)> {
    let mut segments = vec![(ROOT_LABEL.to_string(), ROOT_LABEL.to_string())];
    segments.extend(view.breadcrumbs());

    segments
}

/// Returns the path of the breadcrumb drawn at `column` of the path bar
/// placed in `area`.
pub fn breadcrumb_at(view: &ExplorerView, area: Rect, column: u16) -> Option<String> {
    let separator_width = display_width(SEPARATOR);
    let mut x = layout::inner(area).x;

    for (index, (label, path)) in breadcrumb_segments(view).into_iter().enumerate() {
        if index > 0 {
            x = x.saturating_add(separator_width);
        }

        let label_end = x.saturating_add(display_width(&label));
        if (x..label_end).contains(&column) {
            return Some(path);
        }
        x = label_end;
    }

    None
}
