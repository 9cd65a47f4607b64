use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::sidebar::{SidebarEntry, SidebarState};
use crate::ui::Component;
use crate::ui::layout;
use crate::ui::util::truncate_with_ellipsis;

const SYSTEM_MARKER: &str = "  ";
const FAVORITE_MARKER: &str = "* ";

/// Places panel: system locations followed by favorites.
pub struct Sidebar<'a> {
    focused: bool,
    state: &'a SidebarState,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a SidebarState, focused: bool) -> Self {
        Self { focused, state }
    }

    fn entry_line(&self, index: usize, entry: SidebarEntry<'_>, width: usize) -> Line<'static> {
        let marker = match entry {
            SidebarEntry::System(_) => SYSTEM_MARKER,
            SidebarEntry::Favorite(_) => FAVORITE_MARKER,
        };
        let label = truncate_with_ellipsis(entry.label(), width.saturating_sub(marker.len()));
        let style = if index == self.state.selected && self.focused {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else if index == self.state.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(label, style),
        ])
    }
}

impl Component for Sidebar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let inner = layout::inner(area);
        let visible_rows = usize::from(inner.height);
        let offset = layout::sidebar_offset(self.state.selected, visible_rows);
        let width = usize::from(inner.width);

        let lines: Vec<Line<'static>> = if self.state.is_empty() {
            vec![Line::from(Span::styled(
                "No places",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            (offset..self.state.len())
                .take(visible_rows)
                .filter_map(|index| {
                    self.state
                        .entry(index)
                        .map(|entry| self.entry_line(index, entry, width))
                })
                .collect()
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Places ", Style::default().fg(Color::Cyan))),
        );

        f.render_widget(paragraph, area);
    }
}
