//! Deterministic hashing and gradient noise
//!
//! Everything here is a pure function of its inputs. There is no generator
//! state to reseed, so a cell's outcome never depends on which cells were
//! visited before it.

use std::f64::consts::TAU;

/// SplitMix64 finalizer
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Hash a lattice coordinate under a seed and a salt
///
/// The salt separates independent streams (ore rolls vs lava rolls) that
/// would otherwise share the same value for a cell.
#[inline]
pub fn cell_hash(seed: u64, x: i64, y: i64, salt: u64) -> u64 {
    let mut h = mix64(seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    h = mix64(h ^ (x as u64).wrapping_mul(0x6C8E_9CF5_70B2_1E8B));
    mix64(h ^ (y as u64).wrapping_mul(0xB529_7A4D_3C8F_0A17))
}

/// Uniform value in [0, 1) for a cell
#[inline]
pub fn hash_unit(seed: u64, x: i64, y: i64, salt: u64) -> f64 {
    // Top 53 bits fill an f64 mantissa exactly
    (cell_hash(seed, x, y, salt) >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

const GRADIENT_SALT_A: u64 = 0x6772_6164_5f61;
const GRADIENT_SALT_B: u64 = 0x6772_6164_5f62;

/// Seeded 2D gradient noise
///
/// Each lattice point gets a gradient whose components are standard normal
/// draws, so the output is unbounded in principle but stays well inside
/// [-1.5, 1.5] in practice; callers threshold or rescale it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseField {
    seed: u64,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Box-Muller pair from two independent uniforms
    fn gradient(&self, ix: i64, iy: i64) -> (f64, f64) {
        // Shift into (0, 1] so ln never sees zero
        let u1 = 1.0 - hash_unit(self.seed, ix, iy, GRADIENT_SALT_A);
        let u2 = hash_unit(self.seed, ix, iy, GRADIENT_SALT_B);
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        (r * theta.cos(), r * theta.sin())
    }

    fn dot_grid_gradient(&self, ix: i64, iy: i64, x: f64, y: f64) -> f64 {
        let (gx, gy) = self.gradient(ix, iy);
        (x - ix as f64) * gx + (y - iy as f64) * gy
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let top = smoothstep_lerp(
            self.dot_grid_gradient(x0, y0, x, y),
            self.dot_grid_gradient(x0 + 1, y0, x, y),
            fx,
        );
        let bottom = smoothstep_lerp(
            self.dot_grid_gradient(x0, y0 + 1, x, y),
            self.dot_grid_gradient(x0 + 1, y0 + 1, x, y),
            fx,
        );
        smoothstep_lerp(top, bottom, fy)
    }
}

#[inline]
fn smoothstep_lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t * t * (3.0 - 2.0 * t);
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_unit_range() {
        for x in -50..50 {
            for y in -50..50 {
                let v = hash_unit(42, x, y, 7);
                assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_hash_is_pure() {
        assert_eq!(cell_hash(42, 3, 9, 1), cell_hash(42, 3, 9, 1));
        assert_ne!(cell_hash(42, 3, 9, 1), cell_hash(43, 3, 9, 1));
        assert_ne!(cell_hash(42, 3, 9, 1), cell_hash(42, 9, 3, 1));
        assert_ne!(cell_hash(42, 3, 9, 1), cell_hash(42, 3, 9, 2));
    }

    #[test]
    fn test_hash_unit_roughly_uniform() {
        let n = 20_000;
        let below_half = (0..n).filter(|i| hash_unit(1, *i, 0, 0) < 0.5).count();
        let ratio = below_half as f64 / n as f64;
        assert!((0.47..0.53).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn test_noise_zero_on_lattice_points() {
        let noise = NoiseField::new(99);
        for i in -3..3 {
            assert_eq!(noise.sample(i as f64, 2.0), 0.0);
        }
    }

    #[test]
    fn test_noise_is_reproducible() {
        let a = NoiseField::new(7);
        let b = NoiseField::new(7);
        let c = NoiseField::new(8);
        let mut differs = false;
        for i in 0..200 {
            let (x, y) = (i as f64 * 0.37, i as f64 * 0.11);
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
            differs |= a.sample(x, y) != c.sample(x, y);
        }
        assert!(differs);
    }

    #[test]
    fn test_noise_is_continuous() {
        let noise = NoiseField::new(3);
        let mut prev = noise.sample(0.0, 0.5);
        for i in 1..1000 {
            let v = noise.sample(i as f64 * 0.001, 0.5);
            assert!((v - prev).abs() < 0.05);
            prev = v;
        }
    }
}
