//! Recurring spawn timers
//!
//! Looping timers advanced by elapsed frame time. They keep their own clock
//! and never look at the game phase; the driver decides whether a firing
//! turns into a spawn.

use std::num::NonZeroU32;

use crate::settings::{Settings, SettingsError};

/// A looping timer with a fixed period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period_ms: f64,
    elapsed_ms: f64,
}

impl Interval {
    pub fn new(period_ms: NonZeroU32) -> Self {
        Self {
            period_ms: f64::from(period_ms.get()),
            elapsed_ms: 0.0,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance the clock; returns how many times the timer fired.
    /// Leftover time carries into the next period.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }

    /// Time left until the next firing
    pub fn remaining_ms(&self) -> f64 {
        self.period_ms - self.elapsed_ms
    }
}

/// Spawns due this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTriggers {
    pub safe: u32,
    pub hazard: u32,
}

impl SpawnTriggers {
    pub fn is_empty(&self) -> bool {
        self.safe == 0 && self.hazard == 0
    }
}

/// The two spawn timers of a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSchedule {
    safe: Interval,
    hazard: Interval,
}

impl SpawnSchedule {
    pub fn new(safe_ms: NonZeroU32, hazard_ms: NonZeroU32) -> Self {
        Self {
            safe: Interval::new(safe_ms),
            hazard: Interval::new(hazard_ms),
        }
    }

    /// Timers at the cadence from settings; zero periods are rejected
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let safe =
            NonZeroU32::new(settings.safe_spawn_ms).ok_or(SettingsError::ZeroInterval("safe"))?;
        let hazard = NonZeroU32::new(settings.hazard_spawn_ms)
            .ok_or(SettingsError::ZeroInterval("hazard"))?;
        Ok(Self::new(safe, hazard))
    }

    pub fn advance(&mut self, dt_ms: f64) -> SpawnTriggers {
        SpawnTriggers {
            safe: self.safe.advance(dt_ms),
            hazard: self.hazard.advance(dt_ms),
        }
    }
}
