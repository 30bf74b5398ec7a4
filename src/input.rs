//! Keyboard input mapping.
//!
//! Translates crossterm key events into screen-level actions. Kept as a
//! pure function of (screen, form focus, key) so the bindings are
//! testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{FormField, Screen};

/// A user intent derived from one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Leave the current screen (creator → home, story → creator).
    Back,
    EnterCreator,
    FocusNext,
    FocusPrev,
    CycleLeft,
    CycleRight,
    Insert(char),
    Backspace,
    AddCharacter,
    RemoveCharacter,
    Generate,
    Export,
    CreateAnother,
    ScrollUp,
    ScrollDown,
    None,
}

/// Map a key press to an action for the current screen.
pub fn action_for(screen: Screen, focus: FormField, key: KeyEvent) -> Action {
    // Ctrl+C always quits, raw mode swallows the signal
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match screen {
        Screen::Home => match key.code {
            KeyCode::Enter => Action::EnterCreator,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        },
        Screen::Creator => creator_action(focus, key),
        Screen::Story => match key.code {
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('r') => Action::CreateAnother,
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => Action::Back,
            _ => Action::None,
        },
    }
}

fn creator_action(focus: FormField, key: KeyEvent) -> Action {
    // Control chords work regardless of focus
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Action::AddCharacter,
            KeyCode::Char('d') => Action::RemoveCharacter,
            KeyCode::Char('g') => Action::Generate,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Back,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Down => Action::FocusNext,
        KeyCode::Up => Action::FocusPrev,
        KeyCode::Enter => {
            if focus == FormField::Generate {
                Action::Generate
            } else {
                Action::FocusNext
            }
        }
        KeyCode::Left if !focus.is_text() => Action::CycleLeft,
        KeyCode::Right if !focus.is_text() => Action::CycleRight,
        KeyCode::Backspace if focus.is_text() => Action::Backspace,
        KeyCode::Char(c) => {
            if focus.is_text() {
                Action::Insert(c)
            } else if c == 'q' {
                Action::Quit
            } else {
                Action::None
            }
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_home_bindings() {
        assert_eq!(
            action_for(Screen::Home, FormField::Genre, key(KeyCode::Enter)),
            Action::EnterCreator
        );
        assert_eq!(
            action_for(Screen::Home, FormField::Genre, key(KeyCode::Char('q'))),
            Action::Quit
        );
    }

    #[test]
    fn test_creator_typing_goes_to_text_fields() {
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, key(KeyCode::Char('q'))),
            Action::Insert('q')
        );
        assert_eq!(
            action_for(Screen::Creator, FormField::Genre, key(KeyCode::Char('q'))),
            Action::Quit
        );
        assert_eq!(
            action_for(
                Screen::Creator,
                FormField::CharacterName(0),
                key(KeyCode::Backspace)
            ),
            Action::Backspace
        );
    }

    #[test]
    fn test_creator_arrows_cycle_selects_only() {
        assert_eq!(
            action_for(Screen::Creator, FormField::Genre, key(KeyCode::Left)),
            Action::CycleLeft
        );
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, key(KeyCode::Left)),
            Action::None
        );
    }

    #[test]
    fn test_creator_enter_generates_only_on_button() {
        assert_eq!(
            action_for(Screen::Creator, FormField::Generate, key(KeyCode::Enter)),
            Action::Generate
        );
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, key(KeyCode::Enter)),
            Action::FocusNext
        );
    }

    #[test]
    fn test_creator_control_chords() {
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, ctrl('n')),
            Action::AddCharacter
        );
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, ctrl('d')),
            Action::RemoveCharacter
        );
        assert_eq!(
            action_for(Screen::Creator, FormField::Setting, ctrl('g')),
            Action::Generate
        );
    }

    #[test]
    fn test_story_bindings() {
        assert_eq!(
            action_for(Screen::Story, FormField::Genre, key(KeyCode::Char('e'))),
            Action::Export
        );
        assert_eq!(
            action_for(Screen::Story, FormField::Genre, key(KeyCode::Char('r'))),
            Action::CreateAnother
        );
        assert_eq!(
            action_for(Screen::Story, FormField::Genre, key(KeyCode::Esc)),
            Action::Back
        );
    }
}
