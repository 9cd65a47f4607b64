use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::domain::view::ExplorerView;
use crate::infra::prompt::{Notice, NoticeKind};
use crate::ui::Component;
use crate::ui::state::focus::SearchState;
use crate::ui::util::{display_width, visible_input};

const SEARCH_PREFIX: &str = " Search: ";
const KEY_HINTS: &str =
    " Enter open  Bksp back  u up  / search  m menu  ^N new  d delete  Tab places  q quit";

/// Bottom line: search field, latest notice, or key hints with the item
/// count.
pub struct StatusBar<'a> {
    notice: Option<&'a Notice>,
    search: &'a SearchState,
    snapshot: Option<&'a ExplorerView>,
}

impl<'a> StatusBar<'a> {
    pub fn new(snapshot: Option<&'a ExplorerView>, search: &'a SearchState) -> Self {
        Self {
            notice: None,
            search,
            snapshot,
        }
    }

    /// Sets the notice that replaces the key hints.
    #[must_use]
    pub fn notice(mut self, notice: Option<&'a Notice>) -> Self {
        self.notice = notice;
        self
    }

    fn left_span(&self) -> Span<'static> {
        if let Some(notice) = self.notice {
            let color = match notice.kind {
                NoticeKind::Info => Color::Green,
                NoticeKind::Error => Color::LightRed,
            };

            return Span::styled(
                format!(" {}", notice.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        if let SearchState::Applied { query } = self.search {
            return Span::styled(
                format!("{SEARCH_PREFIX}{query}  (/ edit, Esc clear)"),
                Style::default().fg(Color::Yellow),
            );
        }

        Span::raw(KEY_HINTS)
    }

    fn item_count(&self) -> String {
        match self.snapshot {
            Some(snapshot) if snapshot.items.len() == 1 => "1 item ".to_string(),
            Some(snapshot) => format!("{} items ", snapshot.items.len()),
            None => String::new(),
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let style = Style::default().bg(Color::DarkGray).fg(Color::White);

        if let SearchState::Editing(input) = self.search {
            let prefix_width = display_width(SEARCH_PREFIX);
            let field_width = area.width.saturating_sub(prefix_width);
            let (visible, cursor_column) = visible_input(input, field_width);
            let line = Line::from(vec![
                Span::styled(SEARCH_PREFIX, Style::default().fg(Color::Yellow)),
                Span::raw(visible),
            ]);
            f.render_widget(Paragraph::new(line).style(style), area);
            f.set_cursor_position((
                area.x
                    .saturating_add(prefix_width)
                    .saturating_add(cursor_column),
                area.y,
            ));

            return;
        }

        let left_span = self.left_span();
        let right_text = self.item_count();
        let left_width = u16::try_from(left_span.width()).unwrap_or(u16::MAX);
        let right_width = display_width(&right_text);
        let padding = area
            .width
            .saturating_sub(left_width.saturating_add(right_width));
        let status_line = Paragraph::new(Line::from(vec![
            left_span,
            Span::raw(" ".repeat(usize::from(padding))),
            Span::styled(right_text, Style::default().fg(Color::Gray)),
        ]))
        .style(style);

        f.render_widget(status_line, area);
    }
}
