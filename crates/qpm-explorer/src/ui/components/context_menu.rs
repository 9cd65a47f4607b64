use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;
use crate::ui::layout;
use crate::ui::state::overlay::ContextMenuState;

/// Popup listing the entries available for the menu target.
pub struct ContextMenu<'a> {
    menu: &'a ContextMenuState,
}

impl<'a> ContextMenu<'a> {
    pub fn new(menu: &'a ContextMenuState) -> Self {
        Self { menu }
    }
}

impl Component for ContextMenu<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let options = self.menu.options();
        let menu_area = layout::context_menu_area(self.menu.position, options.len(), area);
        let lines: Vec<Line<'static>> = options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let style = if index == self.menu.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                Line::from(Span::styled(format!(" {:<18}", option.label), style))
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(Clear, menu_area);
        f.render_widget(paragraph, menu_area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::domain::view::FileNode;
    use crate::ui::state::overlay::MenuPosition;

    #[test]
    fn test_render_lists_entry_options_at_position() {
        // Arrange
        let mut terminal =
            Terminal::new(TestBackend::new(60, 12)).expect("failed to create terminal");
        let menu = ContextMenuState {
            position: MenuPosition { x: 5, y: 2 },
            selected: 0,
            target: Some(FileNode {
                name: "docs".to_string(),
                is_dir: true,
                size: 0,
            }),
        };

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                ContextMenu::new(&menu).render(f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let first_entry: String = (6..20).map(|column| buffer[(column, 3)].symbol()).collect();
        let text: String = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(first_entry.contains("Open"));
        assert!(text.contains("Add to Favorites"));
        assert!(!text.contains("New File"));
    }
}
