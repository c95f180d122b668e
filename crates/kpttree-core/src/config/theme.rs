//! Colours for the tree view.
//!
//! Colours are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use serde::{Deserialize, Serialize};

/// Tree view colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_dir_fg")]
    pub dir_fg: String,
    #[serde(default = "default_file_fg")]
    pub file_fg: String,
    #[serde(default = "default_kptfile_fg")]
    pub kptfile_fg: String,
    #[serde(default = "default_selected_fg")]
    pub selected_fg: String,
    #[serde(default = "default_border_fg")]
    pub border_fg: String,
    #[serde(default = "default_status_fg")]
    pub status_fg: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dir_fg: default_dir_fg(),
            file_fg: default_file_fg(),
            kptfile_fg: default_kptfile_fg(),
            selected_fg: default_selected_fg(),
            border_fg: default_border_fg(),
            status_fg: default_status_fg(),
        }
    }
}

fn default_dir_fg() -> String {
    "blue".to_string()
}

fn default_file_fg() -> String {
    "reset".to_string()
}

fn default_kptfile_fg() -> String {
    "magenta".to_string()
}

fn default_selected_fg() -> String {
    "yellow".to_string()
}

fn default_border_fg() -> String {
    "dark_gray".to_string()
}

fn default_status_fg() -> String {
    "cyan".to_string()
}

/// Parses a colour string into a `ratatui::style::Color`.
///
/// Supports named colours (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}
