//! Story screen rendering: generation wait and staged reveal

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::{SpeakerSide, StoryInputs, StoryPart};
use crate::theme::{
    avatar_color, pulse_color, spinner_frame, BG_SURFACE, BORDER_SUBTLE, CYAN_PRIMARY,
    MAGENTA_SECONDARY, TEXT_MUTED, TEXT_NARRATION, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::helpers::wrap_block;

/// Dialogue wraps narrower than narration, like a chat bubble.
const DIALOGUE_WIDTH_FRACTION: (usize, usize) = (2, 3);

pub fn render_story(frame: &mut Frame, app: &App, area: Rect) {
    if app.generation.is_pending() {
        render_loading(frame, app, area);
        return;
    }

    let (Some(story), Some(inputs)) = (&app.story, &app.inputs) else {
        return;
    };

    let title = match &app.sequencer {
        Some(seq) if !seq.is_complete() => format!(
            " \u{2726} Your Generated Story ({}/{}) ",
            seq.visible_count(),
            app.reveals.len()
        ),
        _ => " \u{2726} Your Generated Story ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .title_bottom(format!(
            " Genre: {} | Tone: {} ",
            inputs.genre, inputs.tone
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SURFACE));

    let inner = block.inner(area);
    let width = inner.width.saturating_sub(2).max(8) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (index, reveal) in app.reveals.iter().enumerate() {
        if !reveal.visible {
            continue;
        }
        let Some(part) = story.get(index) else {
            continue;
        };
        let (visible_text, typing) = match &reveal.typewriter {
            Some(tw) => (tw.visible(), !tw.is_complete()),
            None => ("", false),
        };
        match part {
            StoryPart::Narration { .. } => {
                narration_lines(&mut lines, visible_text, typing, width, app.animation_tick);
            }
            StoryPart::Dialogue { character_id, .. } => {
                dialogue_lines(
                    &mut lines,
                    inputs,
                    *character_id,
                    visible_text,
                    typing,
                    width,
                    app.animation_tick,
                );
            }
            StoryPart::ImagePlaceholder => scene_lines(&mut lines, width),
        }
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            spinner_frame(app.animation_tick),
            Style::default().fg(CYAN_PRIMARY),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Brewing your tale...",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Our AI is weaving characters, plot, and magic together.",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(height)])
        .split(area);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        layout[1],
    );
}

fn cursor_span(tick: u64) -> Span<'static> {
    Span::styled(
        "\u{258c}",
        Style::default().fg(pulse_color(tick, CYAN_PRIMARY, TEXT_MUTED)),
    )
}

fn narration_lines(lines: &mut Vec<Line>, text: &str, typing: bool, width: usize, tick: u64) {
    let wrapped = wrap_block(text, width);
    let last = wrapped.len().saturating_sub(1);
    for (i, row) in wrapped.into_iter().enumerate() {
        let mut spans = vec![Span::styled(
            row,
            Style::default()
                .fg(TEXT_NARRATION)
                .add_modifier(Modifier::ITALIC),
        )];
        if typing && i == last {
            spans.push(cursor_span(tick));
        }
        lines.push(Line::from(spans));
    }
}

fn dialogue_lines(
    lines: &mut Vec<Line>,
    inputs: &StoryInputs,
    character_id: u64,
    text: &str,
    typing: bool,
    width: usize,
    tick: u64,
) {
    let roster_pos = inputs.characters.iter().position(|c| c.id == character_id);
    let character = roster_pos.map(|i| &inputs.characters[i]);
    let name = character
        .map(|c| c.name.as_str())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Unknown");
    let initials = character.map(|c| c.initials()).unwrap_or_default();
    let color = avatar_color(roster_pos.unwrap_or(0));
    let alignment = match SpeakerSide::for_id(character_id) {
        SpeakerSide::Left => Alignment::Left,
        SpeakerSide::Right => Alignment::Right,
    };

    let badge = if initials.is_empty() {
        format!("\u{25cf} {}", name)
    } else {
        format!("({}) {}", initials, name)
    };
    lines.push(
        Line::from(Span::styled(
            badge,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(alignment),
    );

    let bubble_width = width * DIALOGUE_WIDTH_FRACTION.0 / DIALOGUE_WIDTH_FRACTION.1;
    let wrapped = wrap_block(text, bubble_width.max(8));
    let last = wrapped.len().saturating_sub(1);
    for (i, row) in wrapped.into_iter().enumerate() {
        let mut spans = vec![Span::styled(row, Style::default().fg(TEXT_PRIMARY))];
        if typing && i == last {
            spans.push(cursor_span(tick));
        }
        lines.push(Line::from(spans).alignment(alignment));
    }
}

fn scene_lines(lines: &mut Vec<Line>, width: usize) {
    let rule = "\u{2504}".repeat(width);
    lines.push(Line::from(Span::styled(
        rule.clone(),
        Style::default().fg(BORDER_SUBTLE),
    )));
    lines.push(
        Line::from(Span::styled(
            "\u{2726}  AI-Generated Scene  \u{2726}",
            Style::default().fg(MAGENTA_SECONDARY),
        ))
        .alignment(Alignment::Center),
    );
    lines.push(Line::from(Span::styled(
        rule,
        Style::default().fg(BORDER_SUBTLE),
    )));
}
