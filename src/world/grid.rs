//! Tile storage for the world

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::world::tile::Tile;

/// Pixels per tile edge
pub const TILE_SIZE: f32 = 16.0;

/// Returned for every query outside the grid
pub const BOUNDARY_TILE: Tile = Tile::Stone;

/// Fixed-size 2D tile grid, row-major
///
/// Reads outside the grid return `BOUNDARY_TILE` so the world edge behaves
/// like solid rock; writes outside the grid are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl WorldGrid {
    /// All-Air grid
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Tile::Air)
    }

    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * TILE_SIZE, self.height as f32 * TILE_SIZE)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        match self.index(x, y) {
            Some(i) => self.tiles[i],
            None => BOUNDARY_TILE,
        }
    }

    #[inline]
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_solid()
    }

    #[inline]
    pub fn is_damaging(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_damaging()
    }

    /// Dig out a tile. Returns what was removed, or `None` when the cell
    /// was already Air (or outside the world).
    pub fn break_tile(&mut self, x: i32, y: i32) -> Option<Tile> {
        let i = self.index(x, y)?;
        let tile = self.tiles[i];
        if tile.is_air() {
            return None;
        }
        self.tiles[i] = Tile::Air;
        Some(tile)
    }

    /// Put a tile into an Air cell. Returns false, changing nothing, when
    /// the cell is occupied, outside the world, or `tile` is Air.
    pub fn place_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if tile.is_air() || !self.tiles[i].is_air() {
            return false;
        }
        self.tiles[i] = tile;
        true
    }

    /// Tile coordinates containing a world position
    #[inline]
    pub fn world_to_tile(pos: Vec2) -> (i32, i32) {
        (
            (pos.x / TILE_SIZE).floor() as i32,
            (pos.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Top-left corner of a tile in world coordinates
    pub fn tile_origin(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
    }

    /// First solid row from the top of a column, if any
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.is_solid(x, y))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// One line per row, one glyph per tile
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for row in self.tiles.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|t| t.glyph()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_stone() {
        let grid = WorldGrid::new(4, 3);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MIN, i32::MAX)] {
            assert_eq!(grid.get_tile(x, y), Tile::Stone);
            assert!(grid.is_solid(x, y));
        }
        assert_eq!(grid.get_tile(3, 2), Tile::Air);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut grid = WorldGrid::new(4, 3);
        let before = grid.clone();
        grid.set_tile(-1, 0, Tile::Dirt);
        grid.set_tile(4, 2, Tile::Dirt);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_break_and_place() {
        let mut grid = WorldGrid::new(4, 4);
        grid.set_tile(1, 1, Tile::Stone);

        assert_eq!(grid.break_tile(1, 1), Some(Tile::Stone));
        assert_eq!(grid.get_tile(1, 1), Tile::Air);

        // Breaking air does nothing
        assert_eq!(grid.break_tile(1, 1), None);

        assert!(grid.place_tile(1, 1, Tile::Dirt));
        assert_eq!(grid.get_tile(1, 1), Tile::Dirt);

        // Placing onto an occupied cell does nothing
        assert!(!grid.place_tile(1, 1, Tile::Stone));
        assert_eq!(grid.get_tile(1, 1), Tile::Dirt);
    }

    #[test]
    fn test_break_and_place_outside_world() {
        let mut grid = WorldGrid::new(2, 2);
        assert_eq!(grid.break_tile(-1, 0), None);
        assert!(!grid.place_tile(5, 5, Tile::Dirt));
        assert!(!grid.place_tile(0, 0, Tile::Air));
    }

    #[test]
    fn test_world_to_tile_floors_negatives() {
        assert_eq!(WorldGrid::world_to_tile(Vec2::new(17.0, 31.9)), (1, 1));
        assert_eq!(WorldGrid::world_to_tile(Vec2::new(-0.5, 0.0)), (-1, 0));
    }

    #[test]
    fn test_surface_row() {
        let mut grid = WorldGrid::new(2, 5);
        grid.set_tile(0, 3, Tile::Grass);
        assert_eq!(grid.surface_row(0), Some(3));
        assert_eq!(grid.surface_row(1), None);
    }

    #[test]
    fn test_ascii_dump() {
        let mut grid = WorldGrid::new(3, 2);
        grid.set_tile(0, 1, Tile::Stone);
        grid.set_tile(2, 1, Tile::Lava);
        assert_eq!(grid.to_ascii(), "   \n# ~\n");
    }
}
