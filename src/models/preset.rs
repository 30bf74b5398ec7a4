//! Story presets
//!
//! A preset is a JSON-encoded [`StoryInputs`] record that prefills the
//! creator form, loaded from a path given on the command line or picked
//! from the `presets/` directory.

use std::path::Path;

use thiserror::Error;

use crate::models::story::StoryInputs;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid preset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preset has no characters")]
    NoCharacters,
    #[error("preset characters must have unique ids")]
    DuplicateIds,
}

/// Load and validate a preset file.
pub fn load_preset(path: &Path) -> Result<StoryInputs, PresetError> {
    let content = std::fs::read_to_string(path)?;
    let inputs: StoryInputs = serde_json::from_str(&content)?;

    if inputs.characters.is_empty() {
        return Err(PresetError::NoCharacters);
    }
    for (i, c) in inputs.characters.iter().enumerate() {
        if inputs.characters[..i].iter().any(|other| other.id == c.id) {
            return Err(PresetError::DuplicateIds);
        }
    }

    Ok(inputs)
}
