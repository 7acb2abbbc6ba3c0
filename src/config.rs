/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::style::Color;
use serde::Deserialize;
use simplelog::LevelFilter;

use crate::domain::entity::KeyBindings;
use crate::domain::glyph::{Glyph, GlyphSet};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub fps: u32,
    pub quit_key: String,
    /// Decorative frame colour; None draws in the terminal default.
    pub color: Option<Color>,
    pub grid: GridConfig,
    pub keys: KeyBindings,
    pub glyphs: GlyphSet,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Problems found while loading, logged once the logger is up.
    pub warnings: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    glyphs: HashMap<String, Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_fps")]
    fps: u32,
    #[serde(default = "default_quit_key")]
    quit_key: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default = "default_cell_size")]
    cell_size: usize,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_key_up")]
    key_up: String,
    #[serde(default = "default_key_down")]
    key_down: String,
    #[serde(default = "default_key_left")]
    key_left: String,
    #[serde(default = "default_key_right")]
    key_right: String,
}

// ── Defaults ──

fn default_fps() -> u32 { 10 }
fn default_quit_key() -> String { "esc".into() }
fn default_color() -> String { "green".into() }
fn default_log_file() -> String { "gridwalk.log".into() }
fn default_log_level() -> String { "info".into() }
fn default_width() -> usize { 20 }
fn default_height() -> usize { 10 }
fn default_cell_size() -> usize { 1 }
fn default_key_up() -> String { "up".into() }
fn default_key_down() -> String { "down".into() }
fn default_key_left() -> String { "left".into() }
fn default_key_right() -> String { "right".into() }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            fps: default_fps(),
            quit_key: default_quit_key(),
            color: default_color(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer {
            key_up: default_key_up(),
            key_down: default_key_down(),
            key_left: default_key_left(),
            key_right: default_key_right(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), Vec::new())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let mut warnings = Vec::new();
        let text = read_config_text(&candidate_dirs(), &mut warnings).unwrap_or_default();
        let mut config = GameConfig::parse(&text);
        warnings.append(&mut config.warnings);
        config.warnings = warnings;
        config
    }

    /// Parse config text directly (missing keys take defaults).
    pub fn parse(text: &str) -> Self {
        let mut warnings = Vec::new();
        let toml_cfg = match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => cfg,
            Err(e) => {
                warnings.push(format!("config parse error: {e}; using defaults"));
                TomlConfig::default()
            }
        };
        GameConfig::from_toml(toml_cfg, warnings)
    }

    fn from_toml(cfg: TomlConfig, mut warnings: Vec<String>) -> Self {
        let fps = positive(cfg.general.fps, default_fps(), "general.fps", &mut warnings);
        let grid = GridConfig {
            width: positive(cfg.grid.width, default_width(), "grid.width", &mut warnings),
            height: positive(cfg.grid.height, default_height(), "grid.height", &mut warnings),
            cell_size: positive(cfg.grid.cell_size, default_cell_size(), "grid.cell_size", &mut warnings),
        };

        let color = parse_color(&cfg.general.color);
        if color.is_none() && !cfg.general.color.eq_ignore_ascii_case("none") {
            warnings.push(format!("unknown color '{}'; drawing uncoloured", cfg.general.color));
        }

        let log_level = cfg.general.log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
            warnings.push(format!("unknown log_level '{}'; using info", cfg.general.log_level));
            LevelFilter::Info
        });

        let mut glyphs = GlyphSet::builtin(grid.cell_size);
        for (name, lines) in cfg.glyphs {
            glyphs.insert(&name, Glyph::new(lines));
        }
        warnings.extend(glyphs.validate(grid.cell_size).iter().map(ToString::to_string));

        GameConfig {
            fps,
            quit_key: cfg.general.quit_key,
            color,
            grid,
            keys: KeyBindings {
                up: cfg.player.key_up,
                down: cfg.player.key_down,
                left: cfg.player.key_left,
                right: cfg.player.key_right,
            },
            glyphs,
            log_file: PathBuf::from(cfg.general.log_file),
            log_level,
            warnings,
        }
    }
}

fn positive<T>(value: T, default: T, key: &str, warnings: &mut Vec<String>) -> T
where
    T: Copy + PartialEq + Default + std::fmt::Display,
{
    if value == T::default() {
        warnings.push(format!("{key} must be > 0; using {default}"));
        default
    } else {
        value
    }
}

/// Colour names accepted in `general.color`.
fn parse_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return None,
    };
    Some(color)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Text of the first readable config.toml in the candidate directories.
fn read_config_text(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> Option<String> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return Some(text),
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::glyph::{EMPTY, PLAYER};

    #[test]
    fn empty_text_gives_defaults() {
        let cfg = GameConfig::parse("");
        assert_eq!(cfg.fps, 10);
        assert_eq!(cfg.quit_key, "esc");
        assert_eq!(cfg.grid, GridConfig { width: 20, height: 10, cell_size: 1 });
        assert_eq!(cfg.keys, KeyBindings::default());
        assert_eq!(cfg.color, Some(Color::Green));
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::parse(
            "[grid]\nwidth = 5\n\n[player]\nkey_up = \"w\"\n",
        );
        assert_eq!(cfg.grid.width, 5);
        assert_eq!(cfg.grid.height, 10);
        assert_eq!(cfg.keys.up, "w");
        assert_eq!(cfg.keys.down, "down");
    }

    #[test]
    fn zero_values_fall_back() {
        let cfg = GameConfig::parse("[general]\nfps = 0\n[grid]\ncell_size = 0\n");
        assert_eq!(cfg.fps, 10);
        assert_eq!(cfg.grid.cell_size, 1);
        assert_eq!(cfg.warnings.len(), 2);
    }

    #[test]
    fn malformed_text_falls_back() {
        let cfg = GameConfig::parse("[grid\nwidth = ");
        assert_eq!(cfg.grid.width, 20);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn glyph_overrides_are_checked() {
        let cfg = GameConfig::parse(
            "[grid]\ncell_size = 2\n[glyphs]\nplayer = [\"<>\", \"/\\\\\"]\nempty = [\"..\"]\n",
        );
        assert_eq!(cfg.glyphs.get(PLAYER), Some(&Glyph::new(["<>", "/\\"])));
        assert_eq!(cfg.glyphs.get(EMPTY), Some(&Glyph::new([".."])));
        // empty has one line for a cell size of two
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn reads_first_config_found() {
        let root = std::env::temp_dir().join(format!("gridwalk-config-{}", std::process::id()));
        let first = root.join("first");
        let second = root.join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(second.join("config.toml"), "[grid]\nwidth = 7\n").unwrap();

        let mut warnings = Vec::new();
        let dirs = [first.clone(), second.clone()];
        let text = read_config_text(&dirs, &mut warnings).unwrap();
        assert_eq!(GameConfig::parse(&text).grid.width, 7);
        assert!(warnings.is_empty());

        assert_eq!(read_config_text(&[first], &mut warnings), None);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn color_names() {
        assert_eq!(parse_color("Cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("gray"), Some(Color::Grey));
        assert_eq!(parse_color("chartreuse"), None);
        assert_eq!(GameConfig::parse("[general]\ncolor = \"none\"\n").color, None);
        assert!(GameConfig::parse("[general]\ncolor = \"none\"\n").warnings.is_empty());
    }
}
