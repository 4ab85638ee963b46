//! Per-tile light levels

use serde::{Deserialize, Serialize};

/// Light level clamped to 0..=15
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LightLevel(u8);

impl LightLevel {
    pub const ZERO: LightLevel = LightLevel(0);
    pub const MAX: LightLevel = LightLevel(15);

    /// Values above 15 saturate
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }

    /// Light from a fraction in [0, 1], floored (`floor(15 * f)`)
    pub fn from_fraction(fraction: f32) -> Self {
        Self::new((fraction.clamp(0.0, 1.0) * Self::MAX.0 as f32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// 0.0 for dark, 1.0 for full light
    pub fn fraction(self) -> f32 {
        self.0 as f32 / Self::MAX.0 as f32
    }

    /// One step dimmer, stopping at zero
    pub fn dimmed(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// Light levels for every tile of a world, same dimensions as the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightGrid {
    width: u32,
    height: u32,
    levels: Vec<LightLevel>,
}

impl LightGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            levels: vec![LightLevel::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Light at a tile; zero outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> LightLevel {
        self.index(x, y).map_or(LightLevel::ZERO, |i| self.levels[i])
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, level: LightLevel) {
        if let Some(i) = self.index(x, y) {
            self.levels[i] = level;
        }
    }

    /// Raise a tile to at least `level`
    #[inline]
    pub fn raise(&mut self, x: i32, y: i32, level: LightLevel) {
        if let Some(i) = self.index(x, y) {
            self.levels[i] = self.levels[i].max(level);
        }
    }

    pub fn clear(&mut self) {
        self.levels.fill(LightLevel::ZERO);
    }

    /// Resize in place, clearing every level
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.levels.clear();
        self.levels.resize(width as usize * height as usize, LightLevel::ZERO);
    }

    pub fn levels(&self) -> &[LightLevel] {
        &self.levels
    }

    pub(crate) fn levels_mut(&mut self) -> &mut [LightLevel] {
        &mut self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_level_saturates() {
        assert_eq!(LightLevel::new(200), LightLevel::MAX);
        assert_eq!(LightLevel::ZERO.dimmed(), LightLevel::ZERO);
        assert_eq!(LightLevel::new(5).dimmed().value(), 4);
    }

    #[test]
    fn test_from_fraction_floors() {
        assert_eq!(LightLevel::from_fraction(1.0).value(), 15);
        assert_eq!(LightLevel::from_fraction(0.5).value(), 7);
        assert_eq!(LightLevel::from_fraction(-3.0).value(), 0);
        assert_eq!(LightLevel::from_fraction(9.0).value(), 15);
    }

    #[test]
    fn test_out_of_bounds_reads_zero() {
        let mut grid = LightGrid::new(3, 3);
        grid.set(1, 1, LightLevel::MAX);
        assert_eq!(grid.get(1, 1), LightLevel::MAX);
        assert_eq!(grid.get(-1, 1), LightLevel::ZERO);
        assert_eq!(grid.get(3, 0), LightLevel::ZERO);
        grid.set(7, 7, LightLevel::MAX);
    }

    #[test]
    fn test_raise_never_lowers() {
        let mut grid = LightGrid::new(2, 2);
        grid.set(0, 0, LightLevel::new(9));
        grid.raise(0, 0, LightLevel::new(4));
        assert_eq!(grid.get(0, 0).value(), 9);
        grid.raise(0, 0, LightLevel::new(12));
        assert_eq!(grid.get(0, 0).value(), 12);
    }
}
