//! Day/night clock
//!
//! The cycle is deliberately lopsided: night and its twilights take most of
//! the day so the dangerous part of the game lasts longer than the safe part.

use serde::{Deserialize, Serialize};

use crate::core::config::ClockConfig;
use crate::lighting::color::Color;

/// Named bands of the day, as used by the ambient light curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    /// 0.85-0.15 - ambient light at its floor
    Night,
    /// 0.15-0.35 - light ramps up
    Dawn,
    /// 0.35-0.65 - full daylight
    Day,
    /// 0.65-0.85 - light ramps down
    Dusk,
}

impl DayPhase {
    pub fn from_phase(phase: f64) -> Self {
        if (0.35..0.65).contains(&phase) {
            DayPhase::Day
        } else if (0.15..0.35).contains(&phase) {
            DayPhase::Dawn
        } else if (0.65..0.85).contains(&phase) {
            DayPhase::Dusk
        } else {
            DayPhase::Night
        }
    }
}

/// Ambient light floor at night
pub const NIGHT_AMBIENT: f32 = 0.05;

const NIGHT_SKY: [u8; 3] = [5, 5, 15];
const TWILIGHT_SKY: [u8; 3] = [255, 100, 50];
const DAY_SKY: [u8; 3] = [135, 206, 235];

fn sky(rgb: [u8; 3]) -> Color {
    Color::rgb8(rgb[0], rgb[1], rgb[2])
}

/// Cyclic time of day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeClock {
    /// 0.0 = midnight, 0.5 = noon
    phase: f64,
    day_length_ms: f64,
}

impl TimeClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            phase: config.start_phase.rem_euclid(1.0),
            day_length_ms: config.day_length_ms,
        }
    }

    /// Clock fixed at a given phase, useful for tests and tools
    pub fn at_phase(phase: f64, day_length_ms: f64) -> Self {
        Self {
            phase: phase.rem_euclid(1.0),
            day_length_ms,
        }
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.phase = (self.phase + delta_ms / self.day_length_ms).rem_euclid(1.0);
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn day_phase(&self) -> DayPhase {
        DayPhase::from_phase(self.phase)
    }

    /// Global illumination factor in [0, 1]
    pub fn ambient_light(&self) -> f32 {
        let p = self.phase as f32;
        match self.day_phase() {
            DayPhase::Day => 1.0,
            DayPhase::Dawn => {
                let t = (p - 0.15) / 0.2;
                0.1 + t * 0.9
            }
            DayPhase::Dusk => {
                let t = (p - 0.65) / 0.2;
                1.0 - t * 0.95
            }
            DayPhase::Night => NIGHT_AMBIENT,
        }
    }

    /// Night for gameplay purposes (spawning, glow) spans 0.7-0.3
    pub fn is_night(&self) -> bool {
        self.phase < 0.3 || self.phase > 0.7
    }

    pub fn sky_color(&self) -> Color {
        let p = self.phase as f32;
        let (night, twilight, day) = (sky(NIGHT_SKY), sky(TWILIGHT_SKY), sky(DAY_SKY));
        if p < 0.3 {
            night.lerp(twilight, p / 0.3)
        } else if p < 0.4 {
            twilight.lerp(day, (p - 0.3) / 0.1)
        } else if p < 0.6 {
            day
        } else if p < 0.7 {
            day.lerp(twilight, (p - 0.6) / 0.1)
        } else {
            twilight.lerp(night, (p - 0.7) / 0.3)
        }
    }

    /// Wall-clock style "HH:MM"
    pub fn clock_string(&self) -> String {
        let hours = self.phase * 24.0;
        let hour = hours as u32;
        let minute = ((hours - hour as f64) * 60.0) as u32;
        format!("{:02}:{:02}", hour, minute)
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}
