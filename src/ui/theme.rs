//! Panel colors.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x38, 0xbd, 0xf8);
pub const BORDER: Color = Color::Rgb(0x47, 0x55, 0x69);
pub const TEXT: Color = Color::Rgb(0xf1, 0xf5, 0xf9);
pub const SEPARATOR: Color = Color::Rgb(0x64, 0x74, 0x8b);
pub const MUTED: Color = Color::Rgb(0x94, 0xa3, 0xb8);
/// Dialog frame.
pub const POPUP_BORDER: Color = Color::Rgb(0xcb, 0xd5, 0xe1);
pub const SUCCESS: Color = Color::Rgb(0x4a, 0xde, 0x80);
pub const FAILURE: Color = Color::Rgb(0xf8, 0x71, 0x71);
/// Background of the selected row and the focused form field.
pub const SELECTED_BG: Color = Color::Rgb(0x1e, 0x29, 0x3b);
