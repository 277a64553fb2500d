//! Frame driver
//!
//! Owns the simulation and its spawn timers. The host calls `frame` once per
//! rendered frame with the pointer position and the elapsed time, and `click`
//! on any pointer press.

use glam::Vec2;

use crate::consts::MAX_FRAME_MS;
use crate::presenter::Presenter;
use crate::schedule::SpawnSchedule;
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameState, TickInput, tick};

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    schedule: SpawnSchedule,
}

impl Game {
    /// Seed comes from settings when fixed, otherwise from the OS
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    /// Fails on settings that `Settings::validate` rejects
    pub fn with_seed(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        let state = GameState::with_settings(settings, seed)?;
        let schedule = SpawnSchedule::from_settings(settings)?;
        log::info!(
            "New game: seed={} field={}x{} cursor={}",
            seed,
            settings.field_width,
            settings.field_height,
            settings.cursor_policy.as_str()
        );
        Ok(Self { state, schedule })
    }

    /// Run one frame: due spawns first, then the tick, then notify
    pub fn frame(&mut self, pointer: Option<Vec2>, dt_ms: f64, presenter: &mut impl Presenter) {
        let dt_ms = dt_ms.min(MAX_FRAME_MS);

        let due = self.schedule.advance(dt_ms);
        if !self.state.is_game_over() {
            for _ in 0..due.safe {
                self.state.spawn_safe_target();
            }
            for _ in 0..due.hazard {
                self.state.spawn_hazard_target();
            }
        }

        tick(&mut self.state, &TickInput { pointer });
        self.flush(presenter);
    }

    /// Pointer press: restarts a finished run, ignored while playing
    pub fn click(&mut self, presenter: &mut impl Presenter) -> bool {
        if !self.state.is_game_over() {
            return false;
        }
        self.restart(presenter);
        true
    }

    /// Forced restart, valid at any time
    pub fn restart(&mut self, presenter: &mut impl Presenter) {
        self.state.reset();
        self.flush(presenter);
    }

    fn flush(&mut self, presenter: &mut impl Presenter) {
        for event in self.state.drain_events() {
            presenter.present(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::presenter::Hud;
    use crate::sim::{GameEvent, GameOverReason, GamePhase, TargetKind};

    fn settings() -> Settings {
        Settings {
            seed: Some(2024),
            ..Default::default()
        }
    }

    #[test]
    fn test_spawns_follow_cadence() {
        let mut game = Game::new(&settings()).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        // Keep the cursor in the top corner so nothing is caught before it escapes
        let pointer = Some(Vec2::ZERO);

        let spawned = |events: &[GameEvent]| -> Vec<TargetKind> {
            events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::Spawned { kind, .. } => Some(*kind),
                    _ => None,
                })
                .collect()
        };

        // Just short of one second at 60 Hz
        for _ in 0..59 {
            game.frame(pointer, FRAME_MS, &mut events);
        }
        assert!(spawned(&events).is_empty());

        // Just past one second
        for _ in 0..2 {
            game.frame(pointer, FRAME_MS, &mut events);
        }
        assert_eq!(spawned(&events), vec![TargetKind::Safe]);

        // Just past two seconds; both timers come due on the same mark
        for _ in 0..60 {
            game.frame(pointer, FRAME_MS, &mut events);
        }
        let kinds = spawned(&events);
        let count = |kind: TargetKind| kinds.iter().filter(|k| **k == kind).count();
        assert_eq!(count(TargetKind::Safe), 2);
        assert_eq!(count(TargetKind::Hazard), 1);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let tiny = Settings {
            field_width: 30.0,
            seed: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            Game::new(&tiny),
            Err(SettingsError::FieldTooSmall { .. })
        ));

        let frozen_timer = Settings {
            hazard_spawn_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            Game::with_seed(&frozen_timer, 1),
            Err(SettingsError::ZeroInterval("hazard"))
        ));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game = Game::new(&settings()).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        game.frame(None, 60_000.0, &mut events);
        assert!(game.state.safe_targets().is_empty());
        assert!(game.state.hazard_targets().is_empty());
    }

    #[test]
    fn test_click_only_restarts_after_game_over() {
        let mut game = Game::new(&settings()).unwrap();
        let mut hud = Hud::default();
        assert!(!game.click(&mut hud));

        // Let ten safe targets escape with the cursor parked in the far corner
        let pointer = Some(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        let mut frames = 0;
        while !game.state.is_game_over() && frames < 60 * 120 {
            game.frame(pointer, FRAME_MS, &mut hud);
            frames += 1;
        }
        assert!(game.state.is_game_over());
        assert!(hud.banner_text().is_some());

        let frozen = game.state.clone();
        game.frame(pointer, 5_000.0, &mut hud);
        assert_eq!(game.state.safe_targets(), frozen.safe_targets());
        assert_eq!(game.state.score(), frozen.score());

        assert!(game.click(&mut hud));
        assert_eq!(game.state.phase(), GamePhase::Playing);
        assert_eq!(hud, Hud::default());
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut game = Game::new(&settings()).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        let pointer = Some(Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
        for _ in 0..60 * 180 {
            game.frame(pointer, FRAME_MS, &mut events);
        }
        let overs: Vec<GameOverReason> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { reason } => Some(*reason),
                _ => None,
            })
            .collect();
        assert_eq!(overs.len(), 1);
        assert!(game.state.is_game_over());
    }

    #[test]
    fn test_restart_mid_game() {
        let mut game = Game::new(&settings()).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        for _ in 0..120 {
            game.frame(Some(Vec2::ZERO), FRAME_MS, &mut events);
        }
        assert!(!game.state.safe_targets().is_empty());

        game.restart(&mut events);
        assert!(game.state.safe_targets().is_empty());
        assert_eq!(events.last(), Some(&GameEvent::MissedChanged { missed: 0 }));
    }
}
