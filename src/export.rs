//! Paged document export.
//!
//! Renders the fully revealed story into a fixed-width, paginated plain
//! text document and writes it next to the user's downloads. Callers gate
//! this on the sequencer's completion signal so the document never
//! captures a half-revealed page.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::models::{SpeakerSide, StoryContent, StoryInputs, StoryPart};
use crate::ui::helpers::wrap_block;

/// Characters per document line.
pub const PAGE_WIDTH: usize = 72;

/// Body lines per page, excluding the footer.
pub const PAGE_LINES: usize = 48;

/// Indent applied to right-aligned dialogue.
const RIGHT_INDENT: usize = 24;

/// Marker rendered in place of a scene illustration.
const SCENE_MARKER: &str = "[ AI-generated scene illustration ]";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the story into document lines, unpaginated.
fn render_body(story: &StoryContent, inputs: &StoryInputs) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(center("S T O R Y W E A V E"));
    lines.push(center(&format!(
        "Genre: {} | Tone: {}",
        inputs.genre, inputs.tone
    )));
    if !inputs.setting.trim().is_empty() {
        lines.push(center(&format!("Setting: {}", inputs.setting)));
    }
    lines.push("─".repeat(PAGE_WIDTH));
    lines.push(String::new());

    for part in story {
        match part {
            StoryPart::Narration { content } => {
                lines.extend(wrap_block(content, PAGE_WIDTH));
            }
            StoryPart::Dialogue {
                character_id,
                content,
            } => {
                let name = inputs
                    .character(*character_id)
                    .map(|c| c.name.as_str())
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or("Unknown");
                let indent = match SpeakerSide::for_id(*character_id) {
                    SpeakerSide::Left => 0,
                    SpeakerSide::Right => RIGHT_INDENT,
                };
                let pad = " ".repeat(indent);
                lines.push(format!("{pad}{name}:"));
                for wrapped in wrap_block(content, PAGE_WIDTH - indent - 2) {
                    lines.push(format!("{pad}  {wrapped}"));
                }
            }
            StoryPart::ImagePlaceholder => {
                lines.push(center(SCENE_MARKER));
            }
        }
        lines.push(String::new());
    }

    lines
}

/// Render the full paginated document.
pub fn render_document(story: &StoryContent, inputs: &StoryInputs) -> String {
    let body = render_body(story, inputs);
    let pages = body.len().div_ceil(PAGE_LINES).max(1);

    let mut out = String::new();
    for (page, chunk) in body.chunks(PAGE_LINES).enumerate() {
        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }
        // Pad the last page so every footer lands at the same depth
        for _ in chunk.len()..PAGE_LINES {
            out.push('\n');
        }
        out.push_str(&center(&format!("— page {} of {} —", page + 1, pages)));
        out.push('\n');
    }
    out
}

/// Write the document to `dir`, named after the genre and the moment of
/// export. Returns the written path.
pub fn export_story(
    story: &StoryContent,
    inputs: &StoryInputs,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let genre = inputs.genre.replace(' ', "");
    let path = dir.join(format!("StoryWeave-{genre}-{millis}.txt"));

    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, render_document(story, inputs))?;
    Ok(path)
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
