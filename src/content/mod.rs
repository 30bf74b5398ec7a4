//! Mock content generation for StoryWeave TUI
//!
//! This module contains the template-driven stand-in for a real
//! text-generation backend: random filler synthesis and the delayed
//! assembly task.

pub mod assemble;
pub mod filler;

pub use assemble::{assemble_story, spawn_generation, GENERATION_DELAY};
