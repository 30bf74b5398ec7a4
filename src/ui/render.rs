//! Top-level frame rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::Screen;
use crate::theme::{BG_PRIMARY, BG_SURFACE, CYAN_PRIMARY, YELLOW_ACCENT};
use crate::ui::{creator, home, story};

/// Render the whole frame: active screen plus the bottom key bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(BG_PRIMARY)), area);

    // Create main layout: content area + bottom bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content area
            Constraint::Length(1), // Bottom bar (single line)
        ])
        .split(area);

    match app.screen {
        Screen::Home => home::render_home(frame, app, main_layout[0]),
        Screen::Creator => creator::render_creator(frame, app, main_layout[0]),
        Screen::Story => story::render_story(frame, app, main_layout[0]),
    }

    render_bottom_bar(frame, app, main_layout[1]);
}

fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    // A transient status message takes the bar over from the key hints
    let bar = if let Some(status) = &app.status {
        Paragraph::new(format!(" {} ", status))
            .style(Style::default().fg(YELLOW_ACCENT).bg(BG_SURFACE))
    } else {
        Paragraph::new(hints_for(app))
            .style(Style::default().fg(Color::Black).bg(CYAN_PRIMARY))
    };
    frame.render_widget(bar, area);
}

fn hints_for(app: &App) -> &'static str {
    match app.screen {
        Screen::Home => " Enter: Begin | q: Quit ",
        Screen::Creator => {
            " Tab: Next | \u{2190}/\u{2192}: Adjust | ^N: Add Character | ^D: Remove | ^G: Generate | Esc: Home "
        }
        Screen::Story => {
            if app.generation.is_pending() {
                " r: Cancel | q: Quit "
            } else {
                " e: Download Story | r: Create Another | \u{2191}/\u{2193}: Scroll | q: Quit "
            }
        }
    }
}
