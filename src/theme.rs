//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors, styles, and layout constants. All
//! palette entries are RGB so the fade ramp can blend any foreground toward
//! the background, the terminal's stand-in for CSS opacity during entrance
//! and reveal animations.

#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Primary dark background - used for the page and dialogs
    pub const BG_PRIMARY: Color = Color::Rgb(18, 18, 26);

    /// Alternative dark background - used for the modal backdrop
    pub const BG_SECONDARY: Color = Color::Rgb(28, 28, 38);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::Rgb(230, 230, 235);

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Rgb(150, 150, 160);

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::Rgb(95, 95, 110);

    // -------------------------------------------------------------------------
    // Accent Colors (branding, emphasis)
    // -------------------------------------------------------------------------

    /// Primary accent - borders, titles, nav labels
    pub const PRIMARY: Color = Color::Rgb(80, 200, 220);

    /// Secondary accent - stat values, highlights
    pub const SECONDARY: Color = Color::Rgb(235, 200, 90);

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Rgb(120, 210, 120);

    /// Error/danger feedback
    pub const ERROR: Color = Color::Rgb(230, 100, 100);

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Rgb(80, 200, 220);

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::Rgb(70, 70, 85);

    /// Section title text
    pub const SECTION_TITLE: Color = Color::Rgb(235, 200, 90);

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::Rgb(95, 95, 110);
}

// =============================================================================
// FADE RAMP
// =============================================================================

/// Blend a foreground color toward the page background.
///
/// `opacity` 1.0 returns the color unchanged, 0.0 returns the background.
/// Non-RGB colors pass through untouched above half opacity and collapse to
/// the muted foreground below it.
pub fn fade(color: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let Color::Rgb(br, bg, bb) = Colors::BG_PRIMARY else {
        return color;
    };
    match color {
        Color::Rgb(r, g, b) => {
            let mix = |fg: u8, back: u8| -> u8 {
                (f64::from(back) + (f64::from(fg) - f64::from(back)) * opacity).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        other if opacity > 0.5 => other,
        _ => Colors::FG_MUTED,
    }
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Main title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section header style
    pub fn section_title() -> Style {
        Style::default()
            .fg(Colors::SECTION_TITLE)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading element style
    pub fn heading() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Stat/counter value style
    pub fn stat() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Inactive border style
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Success message style
    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    /// Error message style
    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension and layout constants
pub struct UiConstants;

impl UiConstants {
    /// Header height (title row + nav row + border)
    pub const HEADER_HEIGHT: u16 = 4;

    /// Status bar height
    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Modal width as a percentage of the terminal
    pub const MODAL_WIDTH_PCT: u16 = 50;

    /// Minimum modal width
    pub const MODAL_MIN_WIDTH: u16 = 36;

    /// Modal height in rows
    pub const MODAL_HEIGHT: u16 = 10;
}
