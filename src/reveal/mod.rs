//! Reveal state machines for StoryWeave TUI
//!
//! This module contains the timed-reveal core: a cancellable timer
//! scheduler, the per-segment typewriter, and the staged segment
//! sequencer. All three are clock-free; the UI loop supplies instants.

pub mod sequencer;
pub mod timer;
pub mod typewriter;

pub use sequencer::{Sequencer, SequencerEvent, DEFAULT_STAGGER};
pub use timer::{Scheduler, TimerId};
pub use typewriter::{Typewriter, TypewriterEvent};
