//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Purple: brand accent (titles, borders, highlighted entry)
//! - Green: enabled, completed, saved
//! - Orange: in progress, attention
//! - Red: errors and unavailable features
//! - Gray: de-emphasized text (descriptions, key hints)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// PALETTE
// ============================================================================

pub const PRIMARY: Color = Color::Rgb(0x7D, 0x56, 0xF4);
pub const ACCENT: Color = Color::Rgb(0xFF, 0x79, 0xC6);
pub const MUTED: Color = Color::Rgb(0x5B, 0x5B, 0x5B);
pub const SUCCESS: Color = Color::Rgb(0x00, 0xFF, 0x00);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA5, 0x00);
pub const ERROR: Color = Color::Rgb(0xFF, 0x00, 0x00);

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Enabled / completed.
pub const STYLE_SUCCESS: Style = Style::new().fg(SUCCESS);

/// In progress / experimental.
pub const STYLE_WARNING: Style = Style::new().fg(WARNING);

/// Validation and persistence errors, unavailable features.
pub const STYLE_ERROR: Style = Style::new().fg(ERROR);

/// Descriptions and metadata.
pub const STYLE_DIM: Style = Style::new().fg(Color::Gray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// App title.
pub const STYLE_TITLE: Style = Style::new().fg(PRIMARY).add_modifier(Modifier::BOLD);

/// Section headings inside panes.
pub const STYLE_SECTION: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);

/// Menu entry under the cursor.
pub const STYLE_HIGHLIGHT: Style = Style::new().fg(PRIMARY).add_modifier(Modifier::BOLD);

/// Any other menu entry.
pub const STYLE_MENU: Style = Style::new().fg(Color::White);

/// Pane and dialog borders.
pub const STYLE_BORDER: Style = Style::new().fg(PRIMARY);

/// Text being typed into a dialog.
pub const STYLE_INPUT: Style = Style::new().fg(Color::White).add_modifier(Modifier::UNDERLINED);

/// Footer / key hints.
pub const STYLE_HELP: Style = Style::new().fg(MUTED);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_SUCCESS.fg, Some(SUCCESS));
        assert_eq!(STYLE_WARNING.fg, Some(WARNING));
        assert_eq!(STYLE_ERROR.fg, Some(ERROR));
    }

    #[test]
    fn highlight_is_bold_primary() {
        assert_eq!(STYLE_HIGHLIGHT.fg, Some(PRIMARY));
        assert!(STYLE_HIGHLIGHT.add_modifier.contains(Modifier::BOLD));
    }
}
