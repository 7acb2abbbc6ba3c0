/// The cell grid and its text frame buffer.
///
/// Cells are addressed 1-based: x in 1..=width, y in 1..=height.
/// The cell set is fixed at construction; only cell images change.
///
/// Rendering is split in two:
///   - `render()` is a pure function of cell state -> frame string
///   - `present()` writes the *cached* frame to a sink, then re-renders
///     the cache for the next call (the shown frame lags one present)

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::glyph::Glyph;

// ── Border pieces ──

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// Glyph height in lines.
    pub size: usize,
    pub image: Glyph,
}

impl Cell {
    pub fn new(x: usize, y: usize, size: usize, image: Glyph) -> Self {
        Cell { x, y, size, image }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

pub struct Grid {
    width: usize,
    height: usize,
    cell_size: usize,
    /// Row-major: index = (y - 1) * width + (x - 1)
    cells: Vec<Cell>,
    /// Image given back to a cell when its occupant leaves.
    empty: Glyph,
    buffered: String,
}

impl Grid {
    /// Build a `width` x `height` grid with every cell showing `empty`.
    pub fn new(width: usize, height: usize, cell_size: usize, empty: Glyph) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 1..=height {
            for x in 1..=width {
                cells.push(Cell::new(x, y, cell_size, empty.clone()));
            }
        }
        Grid { width, height, cell_size, cells, empty, buffered: String::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn empty_glyph(&self) -> &Glyph {
        &self.empty
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Center coordinate, `(width / 2, height / 2)` floored at 1.
    pub fn center(&self) -> (usize, usize) {
        ((self.width / 2).max(1), (self.height / 2).max(1))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (1..=self.width).contains(&x) && (1..=self.height).contains(&y)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid", self.width, self.height,
        );
        (y - 1) * self.width + (x - 1)
    }

    /// Cell at (x, y). Panics when out of range.
    pub fn get_cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Mutable cell at (x, y). Panics when out of range.
    pub fn get_cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let i = self.index(x, y);
        &mut self.cells[i]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.contains(x, y) {
            Some(self.get_cell(x, y))
        } else {
            None
        }
    }

    #[allow(dead_code)]
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Frame that the next `present()` will show.
    #[allow(dead_code)]
    pub fn buffered(&self) -> &str {
        &self.buffered
    }

    /// Compose the whole grid, with border, into one string.
    /// Lines are '\n'-separated; no trailing newline.
    pub fn render(&self) -> String {
        let inner = self.width * self.cell_size;
        let rows = self.height * self.cell_size;
        // border + glyph chars may be multi-byte
        let mut out = String::with_capacity((inner + 3) * (rows + 2) * 3);

        out.push(TOP_LEFT);
        out.extend(std::iter::repeat(HORIZONTAL).take(inner));
        out.push(TOP_RIGHT);
        out.push('\n');

        for y in 1..=self.height {
            for i in 0..self.cell_size {
                out.push(VERTICAL);
                for x in 1..=self.width {
                    out.push_str(self.get_cell(x, y).image.line(i));
                }
                out.push(VERTICAL);
                out.push('\n');
            }
        }

        out.push(BOTTOM_LEFT);
        out.extend(std::iter::repeat(HORIZONTAL).take(inner));
        out.push(BOTTOM_RIGHT);
        out
    }

    /// Home the cursor, write the cached frame, then cache a fresh render.
    ///
    /// Each line is positioned explicitly so the output is correct in raw
    /// mode, where '\n' does not return the carriage.
    pub fn present<W: Write>(&mut self, out: &mut W, color: Option<Color>) -> io::Result<()> {
        queue!(out, MoveTo(0, 0))?;
        if let Some(c) = color {
            queue!(out, SetForegroundColor(c))?;
        }
        for (row, line) in self.buffered.lines().enumerate() {
            // rows past the cursor range cannot be addressed
            let Ok(row) = u16::try_from(row) else {
                break;
            };
            queue!(out, MoveTo(0, row), Print(line))?;
        }
        if color.is_some() {
            queue!(out, ResetColor)?;
        }
        out.flush()?;

        self.buffered = self.render();
        Ok(())
    }

    /// Clear the whole viewport.
    pub fn reset_display<W: Write>(out: &mut W) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize, s: usize) -> Grid {
        Grid::new(w, h, s, Glyph::filled('.', s))
    }

    #[test]
    fn has_one_cell_per_coordinate() {
        let g = grid(4, 3, 1);
        assert_eq!(g.cell_count(), 12);
        for y in 1..=3 {
            for x in 1..=4 {
                let c = g.get_cell(x, y);
                assert_eq!((c.x, c.y), (x, y));
            }
        }
    }

    #[test]
    fn get_is_bounds_checked() {
        let g = grid(2, 2, 1);
        assert!(g.get(0, 1).is_none());
        assert!(g.get(1, 0).is_none());
        assert!(g.get(3, 1).is_none());
        assert!(g.get(2, 2).is_some());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_cell_out_of_range_panics() {
        // x = 3 would still be a valid flat index in a 2x2 grid
        grid(2, 2, 1).get_cell(3, 1);
    }

    #[test]
    fn render_single_line_cells() {
        let mut g = grid(3, 2, 1);
        g.get_cell_mut(2, 1).image = Glyph::new(["@"]);
        assert_eq!(g.render(), "┌───┐\n│.@.│\n│...│\n└───┘");
    }

    #[test]
    fn render_multi_line_cells() {
        let mut g = grid(2, 1, 2);
        g.get_cell_mut(1, 1).image = Glyph::new(["ab", "cd"]);
        assert_eq!(g.render(), "┌────┐\n│ab..│\n│cd..│\n└────┘");
    }

    #[test]
    fn render_is_deterministic() {
        let mut g = grid(5, 4, 2);
        g.get_cell_mut(3, 3).image = Glyph::filled('#', 2);
        assert_eq!(g.render(), g.render());
    }

    #[test]
    fn short_glyph_does_not_panic() {
        let mut g = grid(2, 1, 2);
        g.get_cell_mut(2, 1).image = Glyph::new(["x"]);
        assert_eq!(g.render(), "┌────┐\n│..x│\n│..│\n└────┘");
    }

    #[test]
    fn present_shows_previous_buffer() {
        let mut g = grid(2, 1, 1);
        let mut out = Vec::new();

        // nothing cached yet
        g.present(&mut out, None).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains('┌'));
        assert_eq!(g.buffered(), "┌──┐\n│..│\n└──┘");

        // mutation is only visible one present later
        g.get_cell_mut(1, 1).image = Glyph::new(["@"]);
        out.clear();
        g.present(&mut out, None).unwrap();
        let shown = String::from_utf8_lossy(&out).to_string();
        assert!(shown.contains("│..│"));
        assert!(!shown.contains('@'));
        assert_eq!(g.buffered(), "┌──┐\n│@.│\n└──┘");

        out.clear();
        g.present(&mut out, None).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("│@.│"));
    }

    #[test]
    fn present_wraps_color() {
        let mut g = grid(1, 1, 1);
        let mut out = Vec::new();
        g.present(&mut out, None).unwrap();
        out.clear();
        g.present(&mut out, Some(Color::Green)).unwrap();
        let shown = String::from_utf8_lossy(&out).to_string();
        // SGR foreground green then reset
        assert!(shown.contains("\x1b[38;5;10m"));
        assert!(shown.ends_with("\x1b[0m"));
    }

    #[test]
    fn present_stops_at_last_addressable_row() {
        // 65535 cell rows + 2 border rows: the bottom border lands on line 65536
        let mut g = grid(1, 65535, 1);
        g.get_cell_mut(1, 1).image = Glyph::new(["@"]);
        let mut out = Vec::new();
        g.present(&mut out, None).unwrap();
        out.clear();
        g.present(&mut out, None).unwrap();

        let shown = String::from_utf8_lossy(&out).to_string();
        assert!(shown.contains("│@│"));
        // the bottom border would wrap onto row 0 if rows were truncated
        assert!(!shown.contains('└'));
    }

    #[test]
    fn center_floors_at_one() {
        assert_eq!(grid(5, 5, 1).center(), (2, 2));
        assert_eq!(grid(1, 1, 1).center(), (1, 1));
    }
}
