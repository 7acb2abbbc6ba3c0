/// Game: owns the player and the per-frame update hook.

use crate::domain::entity::{KeyBindings, Player};
use crate::domain::glyph::Glyph;
use crate::domain::grid::Grid;

pub struct Game {
    pub player: Option<Player>,
    player_image: Glyph,
    keys: KeyBindings,
}

impl Game {
    pub fn new(player_image: Glyph, keys: KeyBindings) -> Self {
        Game { player: None, player_image, keys }
    }

    /// Spawn the player at the grid's center, already painted.
    pub fn start(&mut self, grid: &mut Grid) {
        let (x, y) = grid.center();
        self.player = Some(Player::spawn(
            grid,
            x,
            y,
            self.player_image.clone(),
            self.keys.clone(),
        ));
        log::info!("game started, player at ({x},{y})");
    }

    /// Forward a key to the player, if one exists.
    pub fn handle_input(&mut self, grid: &mut Grid, key: &str) {
        if let Some(player) = self.player.as_mut() {
            player.handle_input(grid, key);
        }
    }

    /// Per-frame simulation step. Nothing moves on its own yet.
    pub fn update(&mut self, _grid: &mut Grid) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_places_player_at_center() {
        let mut grid = Grid::new(5, 5, 1, Glyph::new(["."]));
        let mut game = Game::new(Glyph::new(["@"]), KeyBindings::default());
        assert!(game.player.is_none());

        game.start(&mut grid);
        let p = game.player.as_ref().unwrap();
        assert_eq!((p.x, p.y), (2, 2));
        assert_eq!(grid.get_cell(2, 2).image, Glyph::new(["@"]));
    }

    #[test]
    fn input_before_start_is_ignored() {
        let mut grid = Grid::new(3, 3, 1, Glyph::new(["."]));
        let mut game = Game::new(Glyph::new(["@"]), KeyBindings::default());
        let before = grid.render();
        game.handle_input(&mut grid, "right");
        game.update(&mut grid);
        assert_eq!(grid.render(), before);
    }

    #[test]
    fn update_leaves_state_alone() {
        let mut grid = Grid::new(4, 4, 1, Glyph::new(["."]));
        let mut game = Game::new(Glyph::new(["@"]), KeyBindings::default());
        game.start(&mut grid);
        let before = grid.render();
        game.update(&mut grid);
        assert_eq!(grid.render(), before);
    }
}
