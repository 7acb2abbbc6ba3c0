/// Glyphs: multi-line text images drawn into grid cells.
///
/// A glyph for a grid with `cell_size = n` is expected to have `n` lines
/// of `n` columns each. Mismatched glyphs are tolerated (they only
/// misalign the frame); `GlyphSet::validate` reports them.

use std::collections::HashMap;

pub const EMPTY: &str = "empty";
pub const PLAYER: &str = "player";

const EMPTY_FILL: char = ' ';
const PLAYER_FILL: char = '█';

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Glyph {
    lines: Vec<String>,
}

impl Glyph {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Glyph { lines: lines.into_iter().map(Into::into).collect() }
    }

    /// A `size` x `size` square of `ch`.
    pub fn filled(ch: char, size: usize) -> Self {
        let line: String = std::iter::repeat(ch).take(size).collect();
        Glyph { lines: vec![line; size] }
    }

    /// Line `i`, or "" if the glyph is shorter than expected.
    pub fn line(&self, i: usize) -> &str {
        self.lines.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Display width of each line, in chars.
    fn widths(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().map(|l| l.chars().count())
    }
}

/// Problem found by `GlyphSet::validate`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GlyphIssue {
    Missing { name: String },
    WrongHeight { name: String, expected: usize, found: usize },
    WrongWidth { name: String, expected: usize, found: usize },
}

impl std::fmt::Display for GlyphIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphIssue::Missing { name } => write!(f, "glyph '{name}' is not defined"),
            GlyphIssue::WrongHeight { name, expected, found } => {
                write!(f, "glyph '{name}' has {found} lines, cell size is {expected}")
            }
            GlyphIssue::WrongWidth { name, expected, found } => {
                write!(f, "glyph '{name}' has a line {found} wide, cell size is {expected}")
            }
        }
    }
}

/// Named glyph table.
#[derive(Clone, Debug, Default)]
pub struct GlyphSet {
    glyphs: HashMap<String, Glyph>,
}

impl GlyphSet {
    /// Built-in glyphs sized for `cell_size`.
    pub fn builtin(cell_size: usize) -> Self {
        let mut set = GlyphSet::default();
        set.insert(EMPTY, Glyph::filled(EMPTY_FILL, cell_size));
        set.insert(PLAYER, Glyph::filled(PLAYER_FILL, cell_size));
        set
    }

    pub fn insert(&mut self, name: &str, glyph: Glyph) {
        self.glyphs.insert(name.to_string(), glyph);
    }

    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    /// Glyph by name, or an empty glyph when it is missing.
    pub fn get_or_blank(&self, name: &str) -> Glyph {
        self.get(name).cloned().unwrap_or_default()
    }

    /// Check the required glyphs against the grid's cell size.
    pub fn validate(&self, cell_size: usize) -> Vec<GlyphIssue> {
        let mut issues = Vec::new();
        for name in [EMPTY, PLAYER] {
            let Some(glyph) = self.get(name) else {
                issues.push(GlyphIssue::Missing { name: name.to_string() });
                continue;
            };
            if glyph.height() != cell_size {
                issues.push(GlyphIssue::WrongHeight {
                    name: name.to_string(),
                    expected: cell_size,
                    found: glyph.height(),
                });
            }
            if let Some(found) = glyph.widths().find(|w| *w != cell_size) {
                issues.push(GlyphIssue::WrongWidth {
                    name: name.to_string(),
                    expected: cell_size,
                    found,
                });
            }
        }
        issues
    }
}
