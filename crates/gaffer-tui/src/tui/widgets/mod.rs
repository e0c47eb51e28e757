// TUI widget modules for each panel.

pub mod bench;
pub mod error_banner;
pub mod indices;
pub mod kpi;
pub mod match_form;
pub mod pitch;
pub mod quit_confirm;
pub mod reasoning;
pub mod squad_table;
pub mod status_bar;

use ratatui::style::Color;

use gaffer_core::classify::Severity;

/// Terminal colour for a severity class.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Good => Color::Green,
        Severity::Caution => Color::Yellow,
        Severity::Risk => Color::Red,
        Severity::Neutral => Color::DarkGray,
    }
}

/// Flatten a rendered buffer into one string for assertions.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            severity_color(Severity::Good),
            severity_color(Severity::Caution),
            severity_color(Severity::Risk),
            severity_color(Severity::Neutral),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(severity_color(Severity::Risk), Color::Red);
    }
}
