//! Application state and core logic for the StoryWeave TUI.
//!
//! This module contains the `App` struct which holds all state for the
//! interactive terminal UI: the creator form, the mock generation task,
//! and the staged reveal of the generated story.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::cli::CliConfig;
use crate::content;
use crate::export;
use crate::input::Action;
use crate::models::catalog::{GENRES, LENGTH_LONG, LENGTH_MEDIUM, LENGTH_SHORT, LENGTH_STEP, TONES};
use crate::models::{Character, FormField, Screen, StoryContent, StoryInputs, StoryPart};
use crate::reveal::{Scheduler, Sequencer, SequencerEvent, Typewriter, DEFAULT_STAGGER};

/// Per-character reveal intervals, by segment kind.
pub const NARRATION_SPEED: Duration = Duration::from_millis(20);
pub const DIALOGUE_SPEED: Duration = Duration::from_millis(35);

/// How often the ambient animation tick advances.
const ANIMATION_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on the event poll when no timer is imminent.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// State of the creator form
#[derive(Debug, Clone)]
pub struct CreatorForm {
    pub genre_idx: usize,
    pub tone_idx: usize,
    pub setting: String,
    pub characters: Vec<Character>,
    pub length: u32,
    pub focus: FormField,
    next_character_id: u64,
}

impl CreatorForm {
    pub fn new() -> Self {
        Self {
            genre_idx: 0,
            tone_idx: 0,
            setting: String::new(),
            characters: vec![Character::new(1)],
            length: LENGTH_MEDIUM,
            focus: FormField::Genre,
            next_character_id: 2,
        }
    }

    /// Prefill from a loaded preset.
    pub fn from_inputs(inputs: StoryInputs) -> Self {
        let genre_idx = GENRES.iter().position(|g| *g == inputs.genre).unwrap_or(0);
        let tone_idx = TONES.iter().position(|t| *t == inputs.tone).unwrap_or(0);
        let characters = if inputs.characters.is_empty() {
            vec![Character::new(1)]
        } else {
            inputs.characters
        };
        let next_character_id = characters.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            genre_idx,
            tone_idx,
            setting: inputs.setting,
            characters,
            length: inputs.length.clamp(LENGTH_SHORT, LENGTH_LONG),
            focus: FormField::Genre,
            next_character_id,
        }
    }

    /// Immutable snapshot handed to the generation step.
    pub fn inputs(&self) -> StoryInputs {
        StoryInputs {
            genre: GENRES[self.genre_idx].to_string(),
            tone: TONES[self.tone_idx].to_string(),
            setting: self.setting.clone(),
            characters: self.characters.clone(),
            length: self.length,
        }
    }

    /// Focusable fields, in traversal order.
    fn field_order(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Genre, FormField::Tone, FormField::Setting];
        for i in 0..self.characters.len() {
            fields.push(FormField::CharacterName(i));
            fields.push(FormField::CharacterTraits(i));
        }
        fields.push(FormField::Length);
        fields.push(FormField::Generate);
        fields
    }

    pub fn focus_next(&mut self) {
        let order = self.field_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.field_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    /// Adjust the focused select/slider field by one step.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Genre => {
                let len = GENRES.len();
                self.genre_idx = (self.genre_idx + if forward { 1 } else { len - 1 }) % len;
            }
            FormField::Tone => {
                let len = TONES.len();
                self.tone_idx = (self.tone_idx + if forward { 1 } else { len - 1 }) % len;
            }
            FormField::Length => {
                self.length = if forward {
                    (self.length + LENGTH_STEP).min(LENGTH_LONG)
                } else {
                    self.length.saturating_sub(LENGTH_STEP).max(LENGTH_SHORT)
                };
            }
            _ => {}
        }
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Setting => self.setting.push(c),
            FormField::CharacterName(i) => {
                if let Some(ch) = self.characters.get_mut(i) {
                    ch.name.push(c);
                }
            }
            FormField::CharacterTraits(i) => {
                if let Some(ch) = self.characters.get_mut(i) {
                    ch.traits.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Setting => {
                self.setting.pop();
            }
            FormField::CharacterName(i) => {
                if let Some(ch) = self.characters.get_mut(i) {
                    ch.name.pop();
                }
            }
            FormField::CharacterTraits(i) => {
                if let Some(ch) = self.characters.get_mut(i) {
                    ch.traits.pop();
                }
            }
            _ => {}
        }
    }

    /// Append a blank character row and focus its name field.
    pub fn add_character(&mut self) {
        self.characters.push(Character::new(self.next_character_id));
        self.next_character_id += 1;
        self.focus = FormField::CharacterName(self.characters.len() - 1);
    }

    /// Remove the focused character row. The last row always stays.
    pub fn remove_character(&mut self) {
        let Some(row) = self.focus.character_row() else {
            return;
        };
        if self.characters.len() <= 1 || row >= self.characters.len() {
            return;
        }
        self.characters.remove(row);
        let row = row.min(self.characters.len() - 1);
        self.focus = FormField::CharacterName(row);
    }
}

impl Default for CreatorForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock generation lifecycle
pub enum Generation {
    Idle,
    Pending { rx: oneshot::Receiver<StoryContent> },
    Ready,
}

impl Generation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Generation::Pending { .. })
    }
}

/// Reveal state for one mounted story segment
pub struct SegmentReveal {
    pub visible: bool,
    /// None for image placeholders, which need no text reveal.
    pub typewriter: Option<Typewriter>,
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub form: CreatorForm,
    pub scheduler: Scheduler,
    pub generation: Generation,
    /// Snapshot the active story was generated from.
    pub inputs: Option<StoryInputs>,
    pub story: Option<StoryContent>,
    pub reveals: Vec<SegmentReveal>,
    pub sequencer: Option<Sequencer>,
    /// Set once the sequencer reports its final entrance; gates export.
    pub story_complete: bool,
    /// Transient status line (export results, gating hints).
    pub status: Option<String>,
    pub scroll_offset: u16,
    pub should_quit: bool,
    // Animation state
    pub animation_tick: u64,
    last_animation_update: Instant,
    // Configuration
    speed_override: Option<Duration>,
    stagger: Duration,
    seed: Option<u64>,
    pub out_dir: PathBuf,
    runtime: Handle,
}

impl App {
    pub fn new(config: &CliConfig, preset: Option<StoryInputs>, runtime: Handle) -> Self {
        let out_dir = config
            .out_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            screen: Screen::Home,
            form: preset.map(CreatorForm::from_inputs).unwrap_or_default(),
            scheduler: Scheduler::new(),
            generation: Generation::Idle,
            inputs: None,
            story: None,
            reveals: Vec::new(),
            sequencer: None,
            story_complete: false,
            status: None,
            scroll_offset: 0,
            should_quit: false,
            animation_tick: 0,
            last_animation_update: Instant::now(),
            speed_override: config.speed_ms.map(Duration::from_millis),
            stagger: config
                .stagger_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_STAGGER),
            seed: config.seed,
            out_dir,
            runtime,
        }
    }

    /// Advance time-driven state: ambient animation, the pending
    /// generation task, and due reveal timers.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_animation_update) >= ANIMATION_INTERVAL {
            self.animation_tick = self.animation_tick.wrapping_add(1);
            self.last_animation_update = now;
        }

        // The story screen is unreachable without inputs; recover to the
        // form if navigation state went missing.
        if self.screen == Screen::Story && self.inputs.is_none() {
            self.screen = Screen::Creator;
        }

        self.poll_generation(now);
        self.drain_timers(now);
    }

    fn poll_generation(&mut self, now: Instant) {
        let Generation::Pending { rx, .. } = &mut self.generation else {
            return;
        };
        match rx.try_recv() {
            Ok(story) => {
                self.generation = Generation::Ready;
                self.install_story(story, now);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                // The task cannot drop its sender without sending; treat a
                // closed channel as an abandoned generation.
                self.generation = Generation::Idle;
            }
        }
    }

    /// Mount a freshly generated story and start the staged reveal.
    fn install_story(&mut self, story: StoryContent, now: Instant) {
        self.reveals = story
            .iter()
            .map(|part| SegmentReveal {
                visible: false,
                typewriter: part
                    .text()
                    .map(|text| Typewriter::new(text, self.speed_for(part))),
            })
            .collect();

        let mut sequencer = Sequencer::new(story.len(), self.stagger);
        self.story = Some(story);
        self.story_complete = false;
        self.scroll_offset = 0;

        if let Some(SequencerEvent::Entered { index, last }) =
            sequencer.start(&mut self.scheduler, now)
        {
            self.sequencer = Some(sequencer);
            self.on_segment_entered(index, last, now);
        } else {
            self.story_complete = sequencer.is_complete();
            self.sequencer = Some(sequencer);
        }
    }

    fn speed_for(&self, part: &StoryPart) -> Duration {
        if let Some(speed) = self.speed_override {
            return speed;
        }
        match part {
            StoryPart::Dialogue { .. } => DIALOGUE_SPEED,
            _ => NARRATION_SPEED,
        }
    }

    fn on_segment_entered(&mut self, index: usize, last: bool, now: Instant) {
        if let Some(reveal) = self.reveals.get_mut(index) {
            reveal.visible = true;
            if let Some(tw) = &mut reveal.typewriter {
                // Empty texts complete on the spot; nothing to route later
                let _ = tw.start(&mut self.scheduler, now);
            }
        }
        if last {
            self.story_complete = true;
        }
    }

    fn drain_timers(&mut self, now: Instant) {
        // Handlers reschedule relative to the fired deadline, so a coarse
        // UI tick replays a backlog at the exact cadence.
        while let Some((id, deadline)) = self.scheduler.pop_due(now) {
            if let Some(seq) = &mut self.sequencer {
                if seq.owns(id) {
                    if let SequencerEvent::Entered { index, last } =
                        seq.handle_timer(id, &mut self.scheduler, deadline)
                    {
                        self.on_segment_entered(index, last, deadline);
                    }
                    continue;
                }
            }
            for reveal in &mut self.reveals {
                if let Some(tw) = &mut reveal.typewriter {
                    if tw.owns(id) {
                        let _ = tw.handle_timer(id, &mut self.scheduler, deadline);
                        break;
                    }
                }
            }
        }
    }

    /// Snapshot the form and kick off the mock generation.
    pub fn start_generation(&mut self) {
        let inputs = self.form.inputs();
        let rx = content::spawn_generation(&self.runtime, inputs.clone(), self.seed);
        self.teardown_story();
        self.inputs = Some(inputs);
        self.generation = Generation::Pending { rx };
        self.screen = Screen::Story;
        self.status = None;
    }

    /// Cancel reveal timers and drop the mounted story.
    fn teardown_story(&mut self) {
        if let Some(seq) = &mut self.sequencer {
            seq.stop(&mut self.scheduler);
        }
        for reveal in &mut self.reveals {
            if let Some(tw) = &mut reveal.typewriter {
                tw.stop(&mut self.scheduler);
            }
        }
        self.sequencer = None;
        self.reveals.clear();
        self.story = None;
        self.story_complete = false;
        self.scroll_offset = 0;
    }

    /// Back to the creator, keeping the form contents. A still-pending
    /// generation is abandoned by dropping its receiver; the late result
    /// is discarded harmlessly.
    pub fn create_another(&mut self) {
        self.teardown_story();
        self.generation = Generation::Idle;
        self.inputs = None;
        self.status = None;
        self.screen = Screen::Creator;
    }

    /// Export the revealed story. Gated on the sequencer's completion.
    pub fn export(&mut self) {
        if !self.story_complete {
            self.status = Some("The story is still being written...".to_string());
            return;
        }
        let (Some(story), Some(inputs)) = (&self.story, &self.inputs) else {
            return;
        };
        match export::export_story(story, inputs, &self.out_dir) {
            Ok(path) => {
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::EnterCreator => self.screen = Screen::Creator,
            Action::Back => match self.screen {
                Screen::Creator => self.screen = Screen::Home,
                Screen::Story => self.create_another(),
                Screen::Home => self.should_quit = true,
            },
            Action::FocusNext => self.form.focus_next(),
            Action::FocusPrev => self.form.focus_prev(),
            Action::CycleLeft => self.form.cycle(false),
            Action::CycleRight => self.form.cycle(true),
            Action::Insert(c) => self.form.insert_char(c),
            Action::Backspace => self.form.backspace(),
            Action::AddCharacter => self.form.add_character(),
            Action::RemoveCharacter => self.form.remove_character(),
            Action::Generate => self.start_generation(),
            Action::Export => self.export(),
            Action::CreateAnother => self.create_another(),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::None => {}
        }
    }

    /// How long the event poll may block before the next timer is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.scheduler.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::GENERATION_DELAY;

    fn test_config() -> CliConfig {
        CliConfig {
            preset: None,
            speed_ms: None,
            stagger_ms: None,
            seed: Some(7),
            out_dir: Some(PathBuf::from(".")),
            skip_prompts: true,
        }
    }

    fn named(form: &mut CreatorForm, name: &str) {
        form.focus = FormField::CharacterName(0);
        for c in name.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn test_form_focus_traversal_wraps() {
        let mut form = CreatorForm::new();
        let total = form.field_order().len();
        for _ in 0..total {
            form.focus_next();
        }
        assert_eq!(form.focus, FormField::Genre);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Generate);
    }

    #[test]
    fn test_form_cycle_selects() {
        let mut form = CreatorForm::new();
        form.focus = FormField::Genre;
        form.cycle(true);
        assert_eq!(form.genre_idx, 1);
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.genre_idx, GENRES.len() - 1);
    }

    #[test]
    fn test_form_length_clamped() {
        let mut form = CreatorForm::new();
        form.focus = FormField::Length;
        form.length = LENGTH_LONG;
        form.cycle(true);
        assert_eq!(form.length, LENGTH_LONG);
        form.length = LENGTH_SHORT;
        form.cycle(false);
        assert_eq!(form.length, LENGTH_SHORT);
    }

    #[test]
    fn test_form_character_roster_editing() {
        let mut form = CreatorForm::new();
        assert_eq!(form.characters.len(), 1);

        form.add_character();
        assert_eq!(form.characters.len(), 2);
        assert_eq!(form.focus, FormField::CharacterName(1));
        // Fresh rows get fresh ids
        assert_ne!(form.characters[0].id, form.characters[1].id);

        form.remove_character();
        assert_eq!(form.characters.len(), 1);
        // The last row cannot be removed
        form.focus = FormField::CharacterName(0);
        form.remove_character();
        assert_eq!(form.characters.len(), 1);
    }

    #[test]
    fn test_form_text_editing() {
        let mut form = CreatorForm::new();
        form.focus = FormField::Setting;
        for c in "Neo".chars() {
            form.insert_char(c);
        }
        form.backspace();
        assert_eq!(form.setting, "Ne");

        named(&mut form, "Ava");
        assert_eq!(form.characters[0].name, "Ava");
    }

    #[test]
    fn test_form_snapshot_matches_fields() {
        let mut form = CreatorForm::new();
        form.genre_idx = 2;
        form.tone_idx = 1;
        named(&mut form, "Ava");
        let inputs = form.inputs();
        assert_eq!(inputs.genre, GENRES[2]);
        assert_eq!(inputs.tone, TONES[1]);
        assert_eq!(inputs.characters[0].name, "Ava");
        assert_eq!(inputs.length, LENGTH_MEDIUM);
    }

    #[test]
    fn test_form_from_inputs_round_trip() {
        let mut form = CreatorForm::new();
        form.genre_idx = 3;
        named(&mut form, "Ava");
        form.add_character();
        let restored = CreatorForm::from_inputs(form.inputs());
        assert_eq!(restored.genre_idx, 3);
        assert_eq!(restored.characters.len(), 2);
        // New ids keep climbing past the preset's
        assert!(restored.next_character_id > restored.characters[1].id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_flow_reveals_and_completes() {
        let config = test_config();
        let mut app = App::new(&config, None, Handle::current());
        named(&mut app.form, "Ava");

        let t0 = Instant::now();
        app.apply(Action::Generate);
        assert_eq!(app.screen, Screen::Story);
        assert!(app.generation.is_pending());

        // Let the mock backend resolve
        tokio::time::sleep(GENERATION_DELAY * 2).await;
        app.tick(t0);
        let total = app.reveals.len();
        assert_eq!(total, 7);
        assert!(app.reveals[0].visible);
        assert!(!app.reveals[1].visible);
        assert!(!app.story_complete);

        // Drive the stagger timers to the final entrance
        let end = t0 + DEFAULT_STAGGER * (total as u32 - 1);
        app.tick(end);
        assert!(app.reveals.iter().all(|r| r.visible));
        assert!(app.story_complete);
        // Typewriters may still be mid-reveal; that is the documented
        // loose coupling between entrances and character reveal
        app.tick(end + Duration::from_secs(60));
        for reveal in &app.reveals {
            if let Some(tw) = &reveal.typewriter {
                assert!(tw.is_complete());
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_another_abandons_pending_generation() {
        let config = test_config();
        let mut app = App::new(&config, None, Handle::current());

        let t0 = Instant::now();
        app.apply(Action::Generate);
        app.apply(Action::CreateAnother);
        assert_eq!(app.screen, Screen::Creator);
        assert!(!app.generation.is_pending());

        // The late result lands on a dropped receiver without panicking
        tokio::time::sleep(GENERATION_DELAY * 2).await;
        app.tick(t0);
        assert!(app.story.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_gated_on_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.out_dir = Some(dir.path().to_path_buf());
        let mut app = App::new(&config, None, Handle::current());
        named(&mut app.form, "Ava");

        let t0 = Instant::now();
        app.apply(Action::Generate);
        tokio::time::sleep(GENERATION_DELAY * 2).await;
        app.tick(t0);

        // Mid-reveal: export refuses
        app.apply(Action::Export);
        assert!(app.status.as_deref().unwrap().contains("still being written"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        // After the final entrance: export writes a document
        let end = t0 + DEFAULT_STAGGER * (app.reveals.len() as u32 - 1);
        app.tick(end);
        app.apply(Action::Export);
        assert!(app.status.as_deref().unwrap().starts_with("Saved "));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_story_screen_without_inputs_redirects() {
        let config = test_config();
        let mut app = App::new(&config, None, Handle::current());
        app.screen = Screen::Story;
        app.tick(Instant::now());
        assert_eq!(app.screen, Screen::Creator);
    }
}
