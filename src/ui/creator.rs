//! Creator form rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, CreatorForm};
use crate::models::catalog::{length_label, GENRES, LENGTH_LONG, LENGTH_SHORT, TONES};
use crate::models::FormField;
use crate::theme::{
    BG_SURFACE, BORDER_SUBTLE, CYAN_PRIMARY, MAGENTA_SECONDARY, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

const SETTING_PLACEHOLDER: &str = "e.g., A neon-lit cyberpunk city in 2077";
const TRAITS_PLACEHOLDER: &str = "e.g., A cynical detective with a heart of gold";

/// Width of the textual length slider.
const SLIDER_WIDTH: usize = 24;

pub fn render_creator(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;

    let block = Block::default()
        .title(" Craft Your Story's Universe ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SURFACE));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(section("Core Elements"));
    lines.push(select_row(
        form,
        FormField::Genre,
        "Genre",
        GENRES[form.genre_idx],
    ));
    lines.push(select_row(form, FormField::Tone, "Tone", TONES[form.tone_idx]));
    lines.push(text_row(
        form,
        FormField::Setting,
        "Setting",
        &form.setting,
        SETTING_PLACEHOLDER,
    ));
    lines.push(Line::default());

    lines.push(section("Characters"));
    for (i, character) in form.characters.iter().enumerate() {
        let name_placeholder = format!("Character {}", i + 1);
        lines.push(text_row(
            form,
            FormField::CharacterName(i),
            &format!("{}. Name", i + 1),
            &character.name,
            &name_placeholder,
        ));
        lines.push(text_row(
            form,
            FormField::CharacterTraits(i),
            "   Traits",
            &character.traits,
            TRAITS_PLACEHOLDER,
        ));
    }
    lines.push(Line::default());

    lines.push(section("Story Length"));
    lines.push(length_row(form));
    lines.push(Line::default());

    let generate_focused = form.focus == FormField::Generate;
    lines.push(Line::from(Span::styled(
        if generate_focused {
            "\u{25b8} [ Generate Story ]"
        } else {
            "  [ Generate Story ]"
        },
        Style::default()
            .fg(if generate_focused {
                MAGENTA_SECONDARY
            } else {
                TEXT_SECONDARY
            })
            .add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(CYAN_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))
}

fn label_span(form: &CreatorForm, field: FormField, label: &str) -> (Span<'static>, bool) {
    let focused = form.focus == field;
    let marker = if focused { "\u{25b8} " } else { "  " };
    let span = Span::styled(
        format!("{}{:<12}", marker, label),
        Style::default().fg(if focused { CYAN_PRIMARY } else { TEXT_MUTED }),
    );
    (span, focused)
}

fn select_row(form: &CreatorForm, field: FormField, label: &str, value: &str) -> Line<'static> {
    let (label_span, focused) = label_span(form, field, label);
    let value = if focused {
        format!("\u{2190} {} \u{2192}", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        label_span,
        Span::styled(
            value,
            Style::default().fg(if focused { TEXT_PRIMARY } else { TEXT_SECONDARY }),
        ),
    ])
}

fn text_row(
    form: &CreatorForm,
    field: FormField,
    label: &str,
    value: &str,
    placeholder: &str,
) -> Line<'static> {
    let (label_span, focused) = label_span(form, field, label);
    let mut spans = vec![label_span];

    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(TEXT_MUTED)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(TEXT_PRIMARY),
        ));
        if focused {
            spans.push(Span::styled(
                "\u{258f}",
                Style::default().fg(CYAN_PRIMARY),
            ));
        }
    }
    Line::from(spans)
}

fn length_row(form: &CreatorForm) -> Line<'static> {
    let (label_span, _) = label_span(form, FormField::Length, "Length");
    let span = (LENGTH_LONG - LENGTH_SHORT) as usize;
    let filled = ((form.length - LENGTH_SHORT) as usize * SLIDER_WIDTH) / span;
    let bar = format!(
        "[{}{}]",
        "\u{2593}".repeat(filled),
        "\u{2591}".repeat(SLIDER_WIDTH - filled),
    );
    Line::from(vec![
        label_span,
        Span::styled(bar, Style::default().fg(MAGENTA_SECONDARY)),
        Span::styled(
            format!("  {} words ({})", form.length, length_label(form.length)),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ])
}
