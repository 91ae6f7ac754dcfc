use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::{Color, Style};

use crate::formatting::BoxChars;
use crate::tui::components::xterminate_icon::{DEFAULT_ICON_SOURCE, DEFAULT_LABEL_TEXT};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub use_unicode: bool,
    pub icon: IconConfig,
    pub theme: ThemeConfig,
}

/// Defaults for icons created by the demo page and the factory
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IconConfig {
    pub source: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub unfocused_selection_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub tooltip_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tooltip_bg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            use_unicode: true,
            icon: IconConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            source: DEFAULT_ICON_SOURCE.to_string(),
            label: DEFAULT_LABEL_TEXT.to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            unfocused_selection_fg: None,
            tooltip_fg: Color::White,
            tooltip_bg: Color::Black,
        }
    }
}

impl ThemeConfig {
    /// Get the unfocused selection color, calculating 50% darker if not explicitly set
    pub fn unfocused_selection_fg(&self) -> Color {
        self.unfocused_selection_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

impl Config {
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            use_unicode: self.use_unicode,
            selection_fg: self.theme.selection_fg,
            unfocused_selection_fg: self.theme.unfocused_selection_fg,
            tooltip_fg: self.theme.tooltip_fg,
            tooltip_bg: self.theme.tooltip_bg,
            error_fg: Color::Red,
            box_chars: BoxChars::from_use_unicode(self.use_unicode),
        }
    }
}

/// Resolved colors and glyphs handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    pub selection_fg: Color,
    pub unfocused_selection_fg: Option<Color>,
    pub tooltip_fg: Color,
    pub tooltip_bg: Color,
    pub error_fg: Color,
    pub box_chars: BoxChars,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::default().display()
    }
}

impl DisplayConfig {
    pub fn text_style(&self) -> Style {
        Style::default()
    }

    pub fn selection_style(&self, focused: bool) -> Style {
        let fg = if focused {
            self.selection_fg
        } else {
            self.unfocused_selection_fg
                .unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
        };
        Style::default().fg(fg)
    }

    pub fn tooltip_style(&self) -> Style {
        Style::default().fg(self.tooltip_fg).bg(self.tooltip_bg)
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|color_str| {
        parse_color(&color_str)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))
    })
    .transpose()
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = s.strip_prefix('#') {
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => Some(Color::Rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(
            r.trim().parse().ok()?,
            g.trim().parse().ok()?,
            b.trim().parse().ok()?,
        ));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Read the user configuration, falling back to defaults on any problem
pub fn read() -> Config {
    let Some(config_path) = get_config_path() else {
        return Config::default();
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            return Config::default();
        }
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("Grey"), Some(Color::Gray));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("#ffff"), None);
        assert_eq!(parse_color("256,0,0"), None);
    }

    #[test]
    fn test_unfocused_selection_defaults_to_darker() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.unfocused_selection_fg(), Color::Rgb(127, 82, 0));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.icon.source, "icons/icon.png");
        assert_eq!(config.icon.label, "Click to Xterminate");
        assert_eq!(config.log_file, "/dev/null");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r##"
log_level = "debug"
use_unicode = false

[icon]
label = "Remove this"

[theme]
selection_fg = "cyan"
tooltip_bg = "#202020"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.icon.label, "Remove this");
        assert_eq!(config.icon.source, "icons/icon.png");
        assert_eq!(config.theme.selection_fg, Color::Cyan);
        assert_eq!(config.theme.tooltip_bg, Color::Rgb(32, 32, 32));
        assert_eq!(config.theme.tooltip_fg, Color::White);

        let display = config.display();
        assert_eq!(display.box_chars, BoxChars::ascii());
    }

    #[test]
    fn test_config_rejects_bad_color() {
        let result: Result<Config, _> = toml::from_str("[theme]\nselection_fg = \"sparkly\"\n");
        assert!(result.is_err());
    }
}
