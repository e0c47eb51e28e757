// Formation pitch: the starting XI placed on a drawn pitch.
//
// Slot coordinates come from `gaffer_core::formation::layout_with` in pitch
// units with y growing downward (goalkeeper near the bottom edge). The
// canvas y axis grows upward, so every y is flipped as `height - y`.
// Markings are specified against a 360x520 reference pitch and scaled to
// the configured geometry.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use gaffer_core::classify::{slot_severity, to_percent};
use gaffer_core::formation::{layout_with, PitchGeometry, PitchLayout};
use gaffer_core::report::{PlayerSlot, TacticalReport};

use super::severity_color;

const REF_WIDTH: f64 = 360.0;
const REF_HEIGHT: f64 = 520.0;
const MARKING_COLOR: Color = Color::Rgb(70, 120, 70);
const NAME_LIMIT: usize = 9;

pub fn render(frame: &mut Frame, area: Rect, report: &TacticalReport, geometry: &PitchGeometry) {
    let layout = layout_with(&report.recommended_formation, &report.starting_xi, geometry);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Starting XI ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(footer(report, &layout));
    let inner = block.inner(area);

    // Canvas units covered by one terminal cell.
    let cell_w = geometry.width / f64::from(inner.width.max(1));
    let cell_h = geometry.height / f64::from(inner.height.max(1));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, geometry.width])
        .y_bounds([0.0, geometry.height])
        .paint(|ctx| {
            draw_markings(ctx, geometry);
            ctx.layer();
            for slot in layout.slots() {
                let x = slot.x;
                let y = geometry.height - slot.y;
                let color = severity_color(slot_severity(slot.player));
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
                let (top, bottom) = slot_label(slot.player);
                let name_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                print_centered(ctx, geometry, (x, y + cell_h), cell_w, top, name_style);
                if !bottom.is_empty() {
                    let detail_style = Style::default().fg(Color::Gray);
                    print_centered(ctx, geometry, (x, y), cell_w, bottom, detail_style);
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn footer(report: &TacticalReport, layout: &PitchLayout) -> Line<'static> {
    let mut spans = Vec::new();
    if layout.formation_error.is_some() {
        spans.push(Span::styled(
            format!(" formation '{}' unreadable ", report.recommended_formation),
            Style::default().fg(Color::Red),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {} ", report.recommended_formation),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    if layout.dropped > 0 {
        spans.push(Span::styled(
            format!("+{} not shown ", layout.dropped),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

/// Print `text` centred on `at`. The anchor is clamped to the canvas since
/// labels anchored outside the bounds are not drawn at all.
fn print_centered(
    ctx: &mut Context,
    geometry: &PitchGeometry,
    at: (f64, f64),
    cell_w: f64,
    text: String,
    style: Style,
) {
    let half = text.chars().count() as f64 / 2.0 * cell_w;
    let x = (at.0 - half).clamp(0.0, geometry.width);
    let y = at.1.clamp(0.0, geometry.height);
    ctx.print(x, y, Line::from(Span::styled(text, style)));
}

/// Two-line label for a slot: short name (with a marker when the player
/// fills a slot outside their own role) and "POS NN%". Empty slots show "?".
pub fn slot_label(player: Option<&PlayerSlot>) -> (String, String) {
    let Some(p) = player else {
        return ("?".to_string(), String::new());
    };
    let mut name = truncate_name(p.short_name());
    if p.slot_broad.is_some_and(|b| b != p.position) {
        name.push('*');
    }
    let detail = format!("{} {}%", p.specific_position, to_percent(p.fitness_score));
    (name, detail)
}

/// Names longer than nine characters keep eight plus an ellipsis.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_LIMIT {
        let mut short: String = name.chars().take(NAME_LIMIT - 1).collect();
        short.push('…');
        short
    } else {
        name.to_string()
    }
}

fn draw_markings(ctx: &mut Context, geometry: &PitchGeometry) {
    let (w, h) = (geometry.width, geometry.height);
    let sx = w / REF_WIDTH;
    let sy = h / REF_HEIGHT;
    let inset_x = 12.0 * sx;
    let inset_y = 12.0 * sy;

    ctx.draw(&Rectangle {
        x: inset_x,
        y: inset_y,
        width: w - 2.0 * inset_x,
        height: h - 2.0 * inset_y,
        color: MARKING_COLOR,
    });
    ctx.draw(&CanvasLine {
        x1: inset_x,
        y1: h / 2.0,
        x2: w - inset_x,
        y2: h / 2.0,
        color: MARKING_COLOR,
    });
    ctx.draw(&Circle {
        x: w / 2.0,
        y: h / 2.0,
        radius: 42.0 * sx,
        color: MARKING_COLOR,
    });

    // Penalty and six-yard boxes at both ends.
    for (box_x, box_h) in [(85.0, 90.0), (130.0, 38.0)] {
        let x = box_x * sx;
        let width = w - 2.0 * x;
        let height = box_h * sy;
        ctx.draw(&Rectangle {
            x,
            y: inset_y,
            width,
            height,
            color: MARKING_COLOR,
        });
        ctx.draw(&Rectangle {
            x,
            y: h - inset_y - height,
            width,
            height,
            color: MARKING_COLOR,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
