//! Core story data structures
//!
//! This module contains the story content model produced by generation and
//! consumed by the renderer and exporter: characters, story parts, and the
//! immutable inputs record snapshotted from the creator form.

use serde::{Deserialize, Serialize};

/// A character configured in the creator form.
///
/// The id is unique within a session and drives dialogue attribution and
/// badge placement. Fields are editable until generation is triggered;
/// the renderer treats them as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub traits: String,
}

impl Character {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            traits: String::new(),
        }
    }

    /// Initials shown in the speaker badge (two characters, uppercased).
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.name.split_whitespace().collect();
        if words.len() > 1 {
            let mut out = String::new();
            out.extend(words[0].chars().next().map(|c| c.to_ascii_uppercase()));
            out.extend(words[1].chars().next().map(|c| c.to_ascii_uppercase()));
            out
        } else {
            self.name.chars().take(2).collect::<String>().to_uppercase()
        }
    }
}

/// One segment of a generated story, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StoryPart {
    Narration { content: String },
    Dialogue { character_id: u64, content: String },
    ImagePlaceholder,
}

impl StoryPart {
    /// The revealable text of this part, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            StoryPart::Narration { content } | StoryPart::Dialogue { content, .. } => {
                Some(content)
            }
            StoryPart::ImagePlaceholder => None,
        }
    }

    /// The speaking character, for dialogue parts.
    pub fn speaker(&self) -> Option<u64> {
        match self {
            StoryPart::Dialogue { character_id, .. } => Some(*character_id),
            _ => None,
        }
    }
}

/// An ordered story, fixed once generated and replaced wholesale on
/// regeneration.
pub type StoryContent = Vec<StoryPart>;

/// Which side of the page a dialogue segment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerSide {
    Left,
    Right,
}

impl SpeakerSide {
    /// Badge placement is a parity rule over the speaker id: even ids sit
    /// on the right, odd ids on the left.
    pub fn for_id(character_id: u64) -> Self {
        if character_id % 2 == 0 {
            SpeakerSide::Right
        } else {
            SpeakerSide::Left
        }
    }
}

/// Immutable snapshot of the creator form, passed by value into the
/// generation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryInputs {
    pub genre: String,
    pub tone: String,
    #[serde(default)]
    pub setting: String,
    pub characters: Vec<Character>,
    pub length: u32,
}

impl StoryInputs {
    /// Look up a character by id.
    pub fn character(&self, id: u64) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }
}
