use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;
use crate::ui::layout;
use crate::ui::state::overlay::InputDialogState;
use crate::ui::util::visible_input;

/// Centered single-line text prompt with a blinking cursor.
pub struct InputDialog<'a> {
    dialog: &'a InputDialogState,
}

impl<'a> InputDialog<'a> {
    pub fn new(dialog: &'a InputDialogState) -> Self {
        Self { dialog }
    }
}

impl Component for InputDialog<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let dialog_area = layout::input_dialog_area(area);
        let inner = layout::inner(dialog_area);
        let (visible, cursor_column) = visible_input(&self.dialog.input, inner.width);

        let paragraph = Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    format!(" {} ", self.dialog.title),
                    Style::default().fg(Color::Yellow),
                ))
                .title_bottom(Span::styled(
                    " Enter: confirm  Esc: cancel ",
                    Style::default().fg(Color::DarkGray),
                )),
        );

        f.render_widget(Clear, dialog_area);
        f.render_widget(paragraph, dialog_area);
        f.set_cursor_position((inner.x.saturating_add(cursor_column), inner.y));
    }
}
