use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState,
};

use crate::app::cache::{CachedView, ViewStatus};
use crate::domain::view::FileNode;
use crate::ui::Page;

const ROW_HIGHLIGHT_SYMBOL: &str = ">> ";
const SIZE_COLUMN_WIDTH: u16 = 10;

/// File grid listing the entries of the cached snapshot.
///
/// A failed or in-flight request never hides the last good snapshot; the
/// status only shows up in the block title.
pub struct ExplorerPage<'a> {
    focused: bool,
    table_state: &'a mut TableState,
    view: &'a CachedView,
}

impl<'a> ExplorerPage<'a> {
    /// Creates a grid renderer over `view` with the persisted selection.
    pub fn new(view: &'a CachedView, table_state: &'a mut TableState) -> Self {
        Self {
            focused: true,
            table_state,
            view,
        }
    }

    /// Sets whether the grid owns keyboard focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> Line<'static> {
        let path = self
            .view
            .snapshot
            .as_ref()
            .map_or_else(|| "Explorer".to_string(), |snapshot| snapshot.current_path.clone());
        let mut spans = vec![Span::styled(
            format!(" {path} "),
            Style::default().fg(Color::Cyan),
        )];

        match &self.view.status {
            ViewStatus::Idle => {}
            ViewStatus::Loading => spans.push(Span::styled(
                "loading... ",
                Style::default().fg(Color::Yellow),
            )),
            ViewStatus::Error(error) => spans.push(Span::styled(
                format!("! {error} "),
                Style::default().fg(Color::Red),
            )),
        }

        Line::from(spans)
    }

    fn placeholder(&self) -> String {
        match &self.view.status {
            ViewStatus::Loading => "Loading...".to_string(),
            ViewStatus::Error(error) => format!("Failed to load folder: {error}"),
            ViewStatus::Idle => "No folder loaded".to_string(),
        }
    }
}

impl Page for ExplorerPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title());

        let Some(snapshot) = self.view.snapshot.as_deref() else {
            let placeholder = Paragraph::new(self.placeholder())
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(placeholder, area);

            return;
        };

        if snapshot.items.is_empty() {
            let placeholder = Paragraph::new("This folder is empty")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(placeholder, area);

            return;
        }

        let header = Row::new(["Name", "Size"])
            .style(Style::default().bg(Color::Gray).fg(Color::Black))
            .height(1);
        let rows = snapshot.items.iter().map(file_row);
        let table = Table::new(
            rows,
            [Constraint::Fill(1), Constraint::Length(SIZE_COLUMN_WIDTH)],
        )
        .column_spacing(1)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(ROW_HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);

        f.render_stateful_widget(table, area, self.table_state);
    }
}

/// Renders one entry; directories carry a trailing `/`.
fn file_row(node: &FileNode) -> Row<'static> {
    let name_cell = if node.is_dir {
        Cell::from(format!("{}/", node.name)).style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Cell::from(node.name.clone())
    };

    Row::new(vec![name_cell, Cell::from(node.size_label())])
}
