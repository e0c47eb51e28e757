// Quit confirmation overlay.
//
// Drawn over the whole frame while `ViewState::confirm_quit` is set. Match
// and squad data live only in memory, so the dialog says so.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect) {
    let dialog = centered(area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Leave GafferOS? ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let lines = vec![
        Line::from(Span::styled(
            " Squad and match setup are lost.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Quit now? ("),
            key("y", Color::Green),
            Span::raw("/"),
            key("n", Color::Red),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog);
}

/// Dialog rect centred in `area`, shrunk to fit small terminals.
fn centered(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(DIALOG_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::horizontal([Constraint::Length(DIALOG_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    dialog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn dialog_is_centred() {
        let area = Rect::new(0, 0, 80, 24);
        let dialog = centered(area);
        assert_eq!((dialog.width, dialog.height), (DIALOG_WIDTH, DIALOG_HEIGHT));
        assert!((i32::from(dialog.x) * 2 + i32::from(dialog.width) - 80).abs() <= 1);
        assert!((i32::from(dialog.y) * 2 + i32::from(dialog.height) - 24).abs() <= 1);
    }

    #[test]
    fn dialog_fits_tiny_terminal() {
        let area = Rect::new(0, 0, 12, 3);
        let dialog = centered(area);
        assert!(dialog.width <= 12 && dialog.height <= 3);
    }

    #[test]
    fn render_shows_prompt() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, frame.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Leave GafferOS?"));
        assert!(text.contains("Quit now?"));
    }
}
