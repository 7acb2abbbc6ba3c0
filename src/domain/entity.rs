/// The player: a glyph that walks the grid one cell per key press.
///
/// The player does not own the grid; every move is applied to the grid
/// passed in, so the grid stays the single owner of cell state.

use super::glyph::Glyph;
use super::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid coordinates (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Key identifiers for the four directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl KeyBindings {
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        if key == self.up {
            Some(Direction::Up)
        } else if key == self.down {
            Some(Direction::Down)
        } else if key == self.left {
            Some(Direction::Left)
        } else if key == self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: "up".into(),
            down: "down".into(),
            left: "left".into(),
            right: "right".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub image: Glyph,
    pub keys: KeyBindings,
}

impl Player {
    /// Place a player at (x, y) and paint its starting cell.
    pub fn spawn(grid: &mut Grid, x: usize, y: usize, image: Glyph, keys: KeyBindings) -> Self {
        let mut player = Player { x, y, image, keys };
        player.move_by(grid, 0, 0);
        player
    }

    /// React to a key identifier; unbound keys are ignored.
    pub fn handle_input(&mut self, grid: &mut Grid, key: &str) {
        let Some(dir) = self.keys.direction_for(key) else {
            return;
        };
        let (dx, dy) = dir.delta();
        self.move_by(grid, dx, dy);
    }

    /// Move by (dx, dy) if the target is inside the grid.
    ///
    /// Accepted: the vacated cell gets the empty glyph, the target cell
    /// gets the player glyph. Rejected: nothing changes.
    /// Returns whether the move was accepted.
    pub fn move_by(&mut self, grid: &mut Grid, dx: i32, dy: i32) -> bool {
        let Some((nx, ny)) = target(grid, self.x, self.y, dx, dy) else {
            log::debug!("move ({dx},{dy}) from ({},{}) rejected", self.x, self.y);
            return false;
        };
        // spawned off-grid: nothing to vacate
        if grid.contains(self.x, self.y) {
            let empty = grid.empty_glyph().clone();
            grid.get_cell_mut(self.x, self.y).image = empty;
        }
        grid.get_cell_mut(nx, ny).image = self.image.clone();
        self.x = nx;
        self.y = ny;
        log::debug!("player moved to ({nx},{ny})");
        true
    }
}

/// In-bounds target of a move, or None.
fn target(grid: &Grid, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
    let nx = usize::try_from(x as i64 + i64::from(dx)).ok()?;
    let ny = usize::try_from(y as i64 + i64::from(dy)).ok()?;
    grid.get(nx, ny).map(|cell| (cell.x, cell.y))
}
