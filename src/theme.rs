//! Theme module for storyweave-tui
//!
//! This module provides a centralized color palette and styling constants
//! for the "midnight storybook" aesthetic.

use ratatui::style::Color;

// ============================================================================
// Background Colors - Deep Navy Palette
// ============================================================================

/// Primary background color - deep navy (#0a0920)
pub const BG_PRIMARY: Color = Color::Rgb(10, 9, 32);

/// Surface color for panels and cards (#131130)
pub const BG_SURFACE: Color = Color::Rgb(19, 17, 48);

/// Subtle border color (#2a2750)
pub const BORDER_SUBTLE: Color = Color::Rgb(42, 39, 80);

// ============================================================================
// Accent Colors
// ============================================================================

/// Primary accent - electric cyan (#00f5ff)
pub const CYAN_PRIMARY: Color = Color::Rgb(0, 245, 255);

/// Secondary accent - vivid magenta (#ff00e5)
pub const MAGENTA_SECONDARY: Color = Color::Rgb(255, 0, 229);

/// Tertiary accent - lemon yellow (#f7ff00)
pub const YELLOW_ACCENT: Color = Color::Rgb(247, 255, 0);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color - bright white (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Narration text - soft slate (#cbd5e1)
pub const TEXT_NARRATION: Color = Color::Rgb(203, 213, 225);

/// Secondary text color - muted gray (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text color - for labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

// ============================================================================
// Speaker Badges
// ============================================================================

/// Badge colors cycled over the character roster, by roster position.
pub const AVATAR_COLORS: &[Color] = &[
    Color::Rgb(255, 0, 229), // magenta
    Color::Rgb(0, 245, 255), // cyan
    Color::Rgb(247, 255, 0), // yellow
    Color::Rgb(255, 87, 51), // coral
    Color::Rgb(51, 255, 87), // green
];

/// Badge color for a character at roster position `index`.
pub fn avatar_color(index: usize) -> Color {
    AVATAR_COLORS[index % AVATAR_COLORS.len()]
}

// ============================================================================
// Animation
// ============================================================================

/// Spinner frames for the generation wait.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Current spinner frame for an animation tick.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Alternate between two colors on a slow pulse.
pub fn pulse_color(tick: u64, primary: Color, dim: Color) -> Color {
    if (tick / 4) % 2 == 0 {
        primary
    } else {
        dim
    }
}
