// Squad table: one row per player with the cursor cell highlighted.
//
// Columns: #, Name, Pos, Specific, Secondary, Fitness, Avail.
// Fitness is coloured by its severity band.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use gaffer_core::classify::{fitness_severity, to_percent};
use gaffer_core::player::Player;

use super::severity_color;
use crate::tui::{EditTarget, SquadColumn, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let squad = &state.snapshot.squad;
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" Squad ({}/{}) ", squad.len(), state.snapshot.max_players),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    if squad.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            " No players yet. Press + to add one.",
            Style::default().fg(Color::Gray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Specific"),
        Cell::from("Secondary"),
        Cell::from("Fitness"),
        Cell::from("Avail"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = squad
        .iter()
        .enumerate()
        .map(|(i, player)| player_row(state, i, player))
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default().with_selected(Some(state.squad_row));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Text for one editable cell of `player`.
pub fn cell_text(player: &Player, column: SquadColumn) -> String {
    match column {
        SquadColumn::Name => player.name.clone(),
        SquadColumn::Position => player.position().to_string(),
        SquadColumn::Specific => player.specific_position().to_string(),
        SquadColumn::Secondary => player
            .secondary_position()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string()),
        SquadColumn::Fitness => format!("{}%", to_percent(player.fitness_score())),
        SquadColumn::Available => String::from(if player.available { "yes" } else { "no" }),
    }
}

fn player_row<'a>(state: &ViewState, index: usize, player: &Player) -> Row<'a> {
    let on_cursor_row = index == state.squad_row;
    let mut cells = vec![Cell::from(format!("{}", index + 1))];

    for column in SquadColumn::ALL {
        let typing = state.entry.as_ref().filter(|e| {
            matches!(
                (e.target, column),
                (EditTarget::PlayerName(i), SquadColumn::Name)
                    | (EditTarget::PlayerFitness(i), SquadColumn::Fitness) if i == index
            )
        });

        let (text, mut style) = match typing {
            Some(entry) => (
                format!("{}_", entry.buffer),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            None => (cell_text(player, column), column_style(player, column)),
        };
        if on_cursor_row && column == state.squad_column && typing.is_none() {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        cells.push(Cell::from(Span::styled(text, style)));
    }

    let row_style = if player.available {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Row::new(cells).style(row_style)
}

fn column_style(player: &Player, column: SquadColumn) -> Style {
    match column {
        SquadColumn::Fitness => {
            Style::default().fg(severity_color(fitness_severity(player.fitness_score())))
        }
        SquadColumn::Available if !player.available => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;
    use crate::tui::TextEntry;
    use gaffer_core::position::SpecificPosition;

    fn render_text(state: &ViewState, height: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(80, height);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, frame.area(), state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn sample_state() -> ViewState {
        let mut state = ViewState::default();
        let mut cal = Player::new("Cal Centre", SpecificPosition::CB).with_fitness(0.6);
        cal.set_secondary_position(Some(SpecificPosition::RB)).unwrap();
        state.snapshot.squad = vec![
            Player::new("Alex Keeper", SpecificPosition::GK).with_fitness(0.9),
            cal,
            Player::new("Finn Anchor", SpecificPosition::CDM).with_available(false),
        ];
        state
    }

    #[test]
    fn cell_text_formats() {
        let state = sample_state();
        let cal = &state.snapshot.squad[1];
        assert_eq!(cell_text(cal, SquadColumn::Position), "DEF");
        assert_eq!(cell_text(cal, SquadColumn::Specific), "CB");
        assert_eq!(cell_text(cal, SquadColumn::Secondary), "RB");
        assert_eq!(cell_text(cal, SquadColumn::Fitness), "60%");
        assert_eq!(cell_text(&state.snapshot.squad[0], SquadColumn::Secondary), "-");
        assert_eq!(cell_text(&state.snapshot.squad[2], SquadColumn::Available), "no");
    }

    #[test]
    fn fitness_uses_severity_colour() {
        let state = sample_state();
        assert_eq!(
            column_style(&state.snapshot.squad[0], SquadColumn::Fitness).fg,
            Some(Color::Green)
        );
        assert_eq!(
            column_style(&state.snapshot.squad[1], SquadColumn::Fitness).fg,
            Some(Color::Red)
        );
    }

    #[test]
    fn render_lists_players() {
        let state = sample_state();
        let text = render_text(&state, 10);
        assert!(text.contains("Squad (3/25)"));
        assert!(text.contains("Alex Keeper"));
        assert!(text.contains("Finn Anchor"));
        assert!(text.contains("CDM"));
    }

    #[test]
    fn render_empty_squad_hint() {
        let state = ViewState::default();
        assert!(render_text(&state, 6).contains("Press + to add"));
    }

    #[test]
    fn render_shows_entry_buffer() {
        let mut state = sample_state();
        state.squad_row = 2;
        state.entry = Some(TextEntry {
            target: EditTarget::PlayerName(2),
            buffer: "Finn Ank".into(),
        });
        let text = render_text(&state, 10);
        assert!(text.contains("Finn Ank_"));
    }

    #[test]
    fn render_scrolls_to_cursor() {
        let mut state = ViewState::default();
        state.snapshot.squad = (0..25).map(Player::placeholder).collect();
        state.squad_row = 24;
        let text = render_text(&state, 8);
        let last = state.snapshot.squad[24].name.clone();
        assert!(text.contains(&last));
    }
}
