use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;
use crate::ui::util::truncate_with_ellipsis;

const OVERLAY_HEIGHT: u16 = 6;
const MIN_OVERLAY_WIDTH: u16 = 44;
const OVERLAY_WIDTH_PERCENT: u16 = 50;

/// Centered yes/no prompt shown before destructive actions.
///
/// The question stays on one line so both choices remain visible for long
/// file names.
pub struct ConfirmationOverlay<'a> {
    question: &'a str,
    selected_yes: bool,
    title: &'a str,
}

impl<'a> ConfirmationOverlay<'a> {
    pub fn new(title: &'a str, question: &'a str) -> Self {
        Self {
            question,
            selected_yes: false,
            title,
        }
    }

    /// Sets whether `Yes` is highlighted.
    #[must_use]
    pub fn selected_yes(mut self, yes: bool) -> Self {
        self.selected_yes = yes;
        self
    }

    fn choice(label: &'static str, selected: bool) -> Span<'static> {
        if selected {
            return Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            );
        }

        Span::styled(label, Style::default().fg(Color::Gray))
    }
}

impl Component for ConfirmationOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = (area.width * OVERLAY_WIDTH_PERCENT / 100)
            .max(MIN_OVERLAY_WIDTH)
            .min(area.width);
        let height = OVERLAY_HEIGHT.min(area.height);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        let question = truncate_with_ellipsis(self.question, usize::from(width.saturating_sub(4)));

        let paragraph = Paragraph::new(vec![
            Line::from(question),
            Line::from(""),
            Line::from(vec![
                Self::choice(" Yes ", self.selected_yes),
                Span::raw("   "),
                Self::choice(" No ", !self.selected_yes),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(
                    format!(" {} ", self.title),
                    Style::default().fg(Color::Red),
                )),
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}
