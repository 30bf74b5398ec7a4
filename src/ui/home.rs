//! Home splash screen

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;
use crate::theme::{
    pulse_color, CYAN_PRIMARY, MAGENTA_SECONDARY, TEXT_MUTED, TEXT_SECONDARY, YELLOW_ACCENT,
};

const TITLE: &str = "S T O R Y W E A V E";
const TAGLINE: &str = "Craft your story's universe, one segment at a time";

pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(CYAN_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(TAGLINE, Style::default().fg(TEXT_SECONDARY))),
        Line::default(),
        Line::default(),
        feature_line("Unleash Creativity", "infinite worlds from a handful of inputs"),
        feature_line("AI-Powered", "a mock narrator weaves plot, dialogue, and scenes"),
        feature_line("Fully Customizable", "genres, tones, settings, and characters"),
        Line::default(),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to begin",
            Style::default().fg(pulse_color(
                app.animation_tick,
                YELLOW_ACCENT,
                TEXT_MUTED,
            )),
        )),
    ];

    // Center the splash vertically
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(height)])
        .split(area);

    let splash = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(splash, layout[1]);
}

fn feature_line(title: &'static str, detail: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("\u{2726} ", Style::default().fg(MAGENTA_SECONDARY)),
        Span::styled(title, Style::default().fg(CYAN_PRIMARY)),
        Span::styled(
            format!("  {}", detail),
            Style::default().fg(TEXT_MUTED),
        ),
    ])
}
