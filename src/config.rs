use std::time::Duration;

use anyhow::{bail, Result};

use crate::GridInt;

pub const DEFAULT_GRID_SIZE: GridInt = 20;
pub const DEFAULT_BASE_SPEED: f64 = 6.0;
pub const DEFAULT_SPEED_STEP: f64 = 0.75;
pub const DEFAULT_MAX_SPEED: f64 = 16.0;

/// The board must at least fit the initial snake with some room to steer.
const MIN_GRID_SIZE: GridInt = 8;
const MAX_GRID_SIZE: GridInt = 64;

/// Tunables for a game session. Speeds are in cells per second.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid_size: GridInt,
    pub base_speed: f64,
    pub speed_step: f64,
    pub max_speed: f64,
    pub blink_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            base_speed: DEFAULT_BASE_SPEED,
            speed_step: DEFAULT_SPEED_STEP,
            max_speed: DEFAULT_MAX_SPEED,
            blink_interval: Duration::from_millis(250),
        }
    }
}

impl GameConfig {
    pub fn validated(self) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            bail!(
                "grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE,
                MAX_GRID_SIZE,
                self.grid_size
            );
        }
        if self.base_speed <= 0.0 {
            bail!("base speed must be positive, got {}", self.base_speed);
        }
        if self.max_speed < self.base_speed {
            bail!(
                "max speed ({}) must not be below base speed ({})",
                self.max_speed,
                self.base_speed
            );
        }
        Ok(self)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}
