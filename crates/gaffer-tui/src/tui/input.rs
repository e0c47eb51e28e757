// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// controller, or into local ViewState mutations (focus, cursor, text entry,
// scroll). All edits to match or squad data go through the controller; the
// view only keeps the text being typed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use gaffer_core::position::{SpecificPosition, ALL_SPECIFIC};

use super::{match_fields, EditTarget, MatchField, SquadColumn, TextEntry, ViewState};
use crate::protocol::{MatchEdit, SquadEdit, TabId, UserCommand};

/// Rows moved by PageUp / PageDown in the reasoning panel.
const PAGE_SCROLL: u16 = 5;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// controller. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm on Windows also emits Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.entry.is_some() {
        return handle_text_entry(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Tab => switch_tab(view_state, view_state.active_tab.next()),
        KeyCode::BackTab => switch_tab(view_state, view_state.active_tab.prev()),
        KeyCode::Char('1') => switch_tab(view_state, TabId::Match),
        KeyCode::Char('2') => switch_tab(view_state, TabId::Squad),
        KeyCode::Char('3') => switch_tab(view_state, TabId::Report),

        KeyCode::Char('t') => Some(UserCommand::SetTier(view_state.snapshot.tier.toggled())),
        KeyCode::Char('a') => Some(UserCommand::Analyse),

        KeyCode::Esc => view_state
            .snapshot
            .error
            .is_some()
            .then_some(UserCommand::DismissError),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => match view_state.active_tab {
            TabId::Match => handle_match_key(key_event, view_state),
            TabId::Squad => handle_squad_key(key_event, view_state),
            TabId::Report => handle_report_key(key_event, view_state),
        },
    }
}

fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    view_state.active_tab = tab;
    Some(UserCommand::SwitchTab(tab))
}

/// y/q confirm, n/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Text entry
// ---------------------------------------------------------------------------

fn is_numeric_target(target: EditTarget) -> bool {
    matches!(
        target,
        EditTarget::Match(MatchField::Goals(_))
            | EditTarget::Match(MatchField::Stat(_))
            | EditTarget::PlayerFitness(_)
    )
}

fn handle_text_entry(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let entry = view_state.entry.as_mut()?;
    match key_event.code {
        KeyCode::Esc => {
            view_state.entry = None;
            None
        }
        KeyCode::Enter => {
            let entry = view_state.entry.take()?;
            commit_entry(entry)
        }
        KeyCode::Backspace => {
            entry.buffer.pop();
            None
        }
        KeyCode::Char(c) => {
            if !is_numeric_target(entry.target) || c.is_ascii_digit() || c == '.' || c == '-' {
                entry.buffer.push(c);
            }
            None
        }
        _ => None,
    }
}

/// Turn a finished entry into an edit. Unparseable numbers are dropped.
fn commit_entry(entry: TextEntry) -> Option<UserCommand> {
    let text = entry.buffer.trim();
    match entry.target {
        EditTarget::Match(MatchField::Name(side)) => Some(UserCommand::EditMatch(MatchEdit::Name {
            side,
            name: text.to_string(),
        })),
        EditTarget::Match(MatchField::Goals(field)) => {
            let value = text.parse::<i64>().ok()?;
            Some(UserCommand::EditMatch(MatchEdit::Goals { field, value }))
        }
        EditTarget::Match(MatchField::Stat(field)) => {
            let value = text.parse::<f64>().ok()?;
            Some(UserCommand::EditMatch(MatchEdit::Stat { field, value }))
        }
        EditTarget::Match(MatchField::Result(..)) => None,
        EditTarget::PlayerName(index) => Some(UserCommand::EditSquad(SquadEdit::Rename {
            index,
            name: text.to_string(),
        })),
        EditTarget::PlayerFitness(index) => {
            // Typed as a percentage.
            let percent = text.parse::<f64>().ok()?;
            Some(UserCommand::EditSquad(SquadEdit::SetFitness {
                index,
                fitness: percent / 100.0,
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// Match tab
// ---------------------------------------------------------------------------

fn handle_match_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let field_count = match_fields(view_state.snapshot.tier).len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.match_focus = view_state.match_focus.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.match_focus + 1 < field_count {
                view_state.match_focus += 1;
            }
            None
        }
        KeyCode::Left | KeyCode::Char('h') => adjust_match_field(view_state, -1),
        KeyCode::Right | KeyCode::Char('l') => adjust_match_field(view_state, 1),
        KeyCode::Enter => {
            let field = view_state.focused_match_field()?;
            let input = &view_state.snapshot.match_input;
            let buffer = match field {
                MatchField::Name(side) => input.name(side).to_string(),
                MatchField::Goals(g) => input.goals(g).to_string(),
                MatchField::Stat(s) => format_stat(input.stat(s)),
                MatchField::Result(..) => return adjust_match_field(view_state, 1),
            };
            view_state.entry = Some(TextEntry {
                target: EditTarget::Match(field),
                buffer,
            });
            None
        }
        KeyCode::Char('c') => Some(UserCommand::EditMatch(MatchEdit::Confirm)),
        _ => None,
    }
}

/// Nudge the focused field one step in `direction` (+1 or -1).
fn adjust_match_field(view_state: &ViewState, direction: i32) -> Option<UserCommand> {
    let input = &view_state.snapshot.match_input;
    let edit = match view_state.focused_match_field()? {
        MatchField::Name(_) => return None,
        MatchField::Result(side, index) => {
            let current = input.results(side)[index];
            let result = if direction > 0 { current.next() } else { current.prev() };
            MatchEdit::Result { side, index, result }
        }
        MatchField::Goals(field) => MatchEdit::Goals {
            field,
            value: i64::from(input.goals(field)) + i64::from(direction),
        },
        MatchField::Stat(field) => MatchEdit::StepStat {
            field,
            steps: direction,
        },
    };
    Some(UserCommand::EditMatch(edit))
}

fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ---------------------------------------------------------------------------
// Squad tab
// ---------------------------------------------------------------------------

fn handle_squad_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let squad_len = view_state.snapshot.squad.len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.squad_row = view_state.squad_row.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.squad_row + 1 < squad_len {
                view_state.squad_row += 1;
            }
            None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let idx = view_state.squad_column.index().saturating_sub(1);
            view_state.squad_column = SquadColumn::ALL[idx];
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let idx = (view_state.squad_column.index() + 1).min(SquadColumn::ALL.len() - 1);
            view_state.squad_column = SquadColumn::ALL[idx];
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate_squad_cell(view_state),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if squad_len < view_state.snapshot.max_players {
                Some(UserCommand::EditSquad(SquadEdit::SetCount(squad_len + 1)))
            } else {
                None
            }
        }
        KeyCode::Char('-') => {
            if squad_len > 0 {
                Some(UserCommand::EditSquad(SquadEdit::SetCount(squad_len - 1)))
            } else {
                None
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if view_state.squad_row < squad_len {
                Some(UserCommand::EditSquad(SquadEdit::Remove(view_state.squad_row)))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn activate_squad_cell(view_state: &mut ViewState) -> Option<UserCommand> {
    let index = view_state.squad_row;
    let player = view_state.snapshot.squad.get(index)?;
    let edit = match view_state.squad_column {
        SquadColumn::Name => {
            view_state.entry = Some(TextEntry {
                target: EditTarget::PlayerName(index),
                buffer: player.name.clone(),
            });
            return None;
        }
        SquadColumn::Fitness => {
            view_state.entry = Some(TextEntry {
                target: EditTarget::PlayerFitness(index),
                buffer: format!("{:.0}", player.fitness_score() * 100.0),
            });
            return None;
        }
        SquadColumn::Position => SquadEdit::SetPosition {
            index,
            position: player.position().next(),
        },
        SquadColumn::Specific => SquadEdit::SetSpecific {
            index,
            specific: player.specific_position().next_in_role(),
        },
        SquadColumn::Secondary => SquadEdit::SetSecondary {
            index,
            secondary: next_secondary(player.secondary_position(), player.specific_position()),
        },
        SquadColumn::Available => SquadEdit::SetAvailable {
            index,
            available: !player.available,
        },
    };
    Some(UserCommand::EditSquad(edit))
}

/// Cycle None -> each position other than `primary` -> None.
fn next_secondary(
    current: Option<SpecificPosition>,
    primary: SpecificPosition,
) -> Option<SpecificPosition> {
    let start = match current {
        None => 0,
        Some(pos) => ALL_SPECIFIC.iter().position(|p| *p == pos)? + 1,
    };
    ALL_SPECIFIC[start.min(ALL_SPECIFIC.len())..]
        .iter()
        .copied()
        .find(|p| *p != primary)
}

// ---------------------------------------------------------------------------
// Report tab
// ---------------------------------------------------------------------------

fn handle_report_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let scroll = &mut view_state.reasoning_scroll;
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(PAGE_SCROLL),
        KeyCode::PageDown => *scroll = scroll.saturating_add(PAGE_SCROLL),
        KeyCode::Home => *scroll = 0,
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use gaffer_core::assembler::{GoalField, Side, StatField};
    use gaffer_core::player::Player;
    use gaffer_core::position::BroadPosition;
    use gaffer_core::request::{DataTier, MatchResult};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(key(KeyCode::Char(c)), state), None);
        }
    }

    fn squad_state() -> ViewState {
        let mut state = ViewState::default();
        state.active_tab = TabId::Squad;
        state.snapshot.squad = vec![
            Player::new("Alex Keeper", SpecificPosition::GK),
            Player::new("Cal Centre", SpecificPosition::CB).with_fitness(0.72),
        ];
        state
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release, &mut state), None);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = ViewState::default();
        state.entry = Some(TextEntry {
            target: EditTarget::PlayerName(0),
            buffer: String::new(),
        });
        assert_eq!(handle_key(ctrl('c'), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert!(state.confirm_quit);
        // Blocked while confirming
        assert_eq!(handle_key(key(KeyCode::Char('a')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(!state.confirm_quit);

        handle_key(key(KeyCode::Char('q')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('y')), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn tab_keys_switch_locally_and_notify() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Tab), &mut state),
            Some(UserCommand::SwitchTab(TabId::Squad))
        );
        assert_eq!(state.active_tab, TabId::Squad);
        assert_eq!(
            handle_key(key(KeyCode::BackTab), &mut state),
            Some(UserCommand::SwitchTab(TabId::Match))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('3')), &mut state),
            Some(UserCommand::SwitchTab(TabId::Report))
        );
        assert_eq!(state.active_tab, TabId::Report);
    }

    #[test]
    fn tier_toggle_and_analyse() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('t')), &mut state),
            Some(UserCommand::SetTier(DataTier::Tier2))
        );
        state.snapshot.tier = DataTier::Tier2;
        assert_eq!(
            handle_key(key(KeyCode::Char('t')), &mut state),
            Some(UserCommand::SetTier(DataTier::Tier1))
        );
        assert_eq!(handle_key(key(KeyCode::Char('a')), &mut state), Some(UserCommand::Analyse));
    }

    #[test]
    fn esc_dismisses_only_when_error_shown() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        state.snapshot.error = Some("HTTP 500".into());
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), Some(UserCommand::DismissError));
    }

    #[test]
    fn match_focus_stays_in_bounds() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.match_focus, 0);
        for _ in 0..40 {
            handle_key(key(KeyCode::Down), &mut state);
        }
        assert_eq!(state.match_focus, match_fields(DataTier::Tier1).len() - 1);
    }

    #[test]
    fn result_cycles_with_arrows() {
        let mut state = ViewState::default();
        state.match_focus = 1; // first own result
        let current = state.snapshot.match_input.results(Side::Own)[0];
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Result {
                side: Side::Own,
                index: 0,
                result: current.next(),
            }))
        );
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Result {
                side: Side::Own,
                index: 0,
                result: current.next(),
            }))
        );
        assert!(state.entry.is_none());
    }

    #[test]
    fn goals_nudge_from_current_value() {
        let mut state = ViewState::default();
        state.match_focus = 6; // goals scored
        let scored = i64::from(state.snapshot.match_input.goals(GoalField::Scored));
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Goals {
                field: GoalField::Scored,
                value: scored - 1,
            }))
        );
    }

    #[test]
    fn stat_steps_in_tier_two() {
        let mut state = ViewState::default();
        state.snapshot.tier = DataTier::Tier2;
        let fields = match_fields(DataTier::Tier2);
        state.match_focus = fields
            .iter()
            .position(|f| *f == MatchField::Stat(StatField::Possession))
            .unwrap();
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::StepStat {
                field: StatField::Possession,
                steps: 1,
            }))
        );
    }

    #[test]
    fn name_entry_commits_on_enter() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        let entry = state.entry.as_mut().unwrap();
        assert_eq!(entry.target, EditTarget::Match(MatchField::Name(Side::Own)));
        entry.buffer.clear();
        // Global shortcuts are plain text while typing.
        type_text(&mut state, "Tqa FC");
        assert!(!state.confirm_quit);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Name {
                side: Side::Own,
                name: "Tqa FC".into(),
            }))
        );
        assert!(state.entry.is_none());
    }

    #[test]
    fn numeric_entry_filters_and_parses() {
        let mut state = ViewState::default();
        state.match_focus = 7; // goals conceded
        handle_key(key(KeyCode::Enter), &mut state);
        state.entry.as_mut().unwrap().buffer.clear();
        type_text(&mut state, "1x2");
        assert_eq!(state.entry.as_ref().unwrap().buffer, "12");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Goals {
                field: GoalField::Conceded,
                value: 12,
            }))
        );
    }

    #[test]
    fn unparseable_number_is_dropped() {
        let mut state = ViewState::default();
        state.entry = Some(TextEntry {
            target: EditTarget::Match(MatchField::Goals(GoalField::Scored)),
            buffer: "1.2.3".into(),
        });
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(state.entry.is_none());
    }

    #[test]
    fn esc_cancels_entry_without_edit() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Enter), &mut state);
        assert!(state.entry.is_some());
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(state.entry.is_none());
    }

    #[test]
    fn confirm_key_sends_confirm() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::EditMatch(MatchEdit::Confirm))
        );
    }

    #[test]
    fn squad_cursor_and_columns() {
        let mut state = squad_state();
        handle_key(key(KeyCode::Down), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.squad_row, 1);
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.squad_column, SquadColumn::Name);
        for _ in 0..10 {
            handle_key(key(KeyCode::Right), &mut state);
        }
        assert_eq!(state.squad_column, SquadColumn::Available);
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetAvailable {
                index: 1,
                available: false,
            }))
        );
    }

    #[test]
    fn squad_position_cells_cycle() {
        let mut state = squad_state();
        state.squad_row = 1;
        state.squad_column = SquadColumn::Position;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetPosition {
                index: 1,
                position: BroadPosition::Defender.next(),
            }))
        );
        state.squad_column = SquadColumn::Specific;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetSpecific {
                index: 1,
                specific: SpecificPosition::CB.next_in_role(),
            }))
        );
    }

    #[test]
    fn secondary_cycle_skips_primary() {
        assert_eq!(
            next_secondary(None, SpecificPosition::GK),
            Some(ALL_SPECIFIC[1])
        );
        assert_eq!(
            next_secondary(None, SpecificPosition::CB),
            Some(SpecificPosition::GK)
        );
        assert_eq!(
            next_secondary(Some(SpecificPosition::GK), SpecificPosition::CB),
            Some(SpecificPosition::RB)
        );
        let last = ALL_SPECIFIC[ALL_SPECIFIC.len() - 1];
        assert_eq!(next_secondary(Some(last), SpecificPosition::CB), None);
    }

    #[test]
    fn fitness_entry_is_percent() {
        let mut state = squad_state();
        state.squad_row = 1;
        state.squad_column = SquadColumn::Fitness;
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.entry.as_ref().unwrap().buffer, "72");
        handle_key(key(KeyCode::Backspace), &mut state);
        handle_key(key(KeyCode::Backspace), &mut state);
        type_text(&mut state, "90");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetFitness {
                index: 1,
                fitness: 0.9,
            }))
        );
    }

    #[test]
    fn squad_count_respects_bounds() {
        let mut state = squad_state();
        assert_eq!(
            handle_key(key(KeyCode::Char('+')), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetCount(3)))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('-')), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::SetCount(1)))
        );
        state.snapshot.max_players = 2;
        assert_eq!(handle_key(key(KeyCode::Char('+')), &mut state), None);
        state.snapshot.squad.clear();
        assert_eq!(handle_key(key(KeyCode::Char('-')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Char('x')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Char(' ')), &mut state), None);
    }

    #[test]
    fn remove_targets_cursor_row() {
        let mut state = squad_state();
        state.squad_row = 1;
        assert_eq!(
            handle_key(key(KeyCode::Delete), &mut state),
            Some(UserCommand::EditSquad(SquadEdit::Remove(1)))
        );
    }

    #[test]
    fn report_scroll() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Report;
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.reasoning_scroll, 0);
        handle_key(key(KeyCode::PageDown), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.reasoning_scroll, PAGE_SCROLL + 1);
        handle_key(key(KeyCode::Home), &mut state);
        assert_eq!(state.reasoning_scroll, 0);
    }

    #[test]
    fn result_prev_wraps() {
        assert_eq!(MatchResult::Win.prev().next(), MatchResult::Win);
    }
}
