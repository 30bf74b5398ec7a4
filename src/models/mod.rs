//! Data models for StoryWeave TUI
//!
//! This module contains the core data structures:
//! - Story content types (parts, characters, inputs)
//! - Catalogs of genres, tones, and lengths
//! - Preset loading for prefilling the creator form
//! - Enums for navigation and form focus

pub mod catalog;
pub mod enums;
pub mod preset;
pub mod story;

// Re-exports for convenient access
pub use enums::{FormField, Screen};
pub use preset::{load_preset, PresetError};
pub use story::{Character, SpeakerSide, StoryContent, StoryInputs, StoryPart};
