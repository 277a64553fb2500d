//! Circle Catch headless runner
//!
//! Plays the game with a simple autopilot at a fixed 60 Hz and logs what a
//! renderer would be told. Useful for eyeballing balance and for piping the
//! event stream somewhere else with `--json`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec2;

use circle_catch::consts::*;
use circle_catch::sim::{GameOverReason, GameState, RemovalCause, TargetKind};
use circle_catch::{CursorPolicy, Game, Hud, JsonLines, Presenter, Settings};

#[derive(Parser, Debug)]
#[command(name = "circle-catch")]
#[command(about = "Run a headless Circle Catch session with an autopilot")]
struct Cli {
    /// JSON settings file (defaults are used for anything missing)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Fixed RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to play before stopping
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,
    /// Cursor behaviour, overrides the settings file
    #[arg(long, value_enum)]
    cursor: Option<CliCursor>,
    /// Print every event to stdout as a JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliCursor {
    Snap,
    Smooth,
}

impl From<CliCursor> for CursorPolicy {
    fn from(value: CliCursor) -> Self {
        match value {
            CliCursor::Snap => CursorPolicy::Snap,
            CliCursor::Smooth => CursorPolicy::Smooth,
        }
    }
}

/// Logs the interesting notifications and keeps the HUD text current
#[derive(Default)]
struct LogPresenter {
    hud: Hud,
    caught: u32,
}

impl Presenter for LogPresenter {
    fn on_spawn(&mut self, id: u32, kind: TargetKind, pos: Vec2, _radius: f32) {
        log::debug!("spawn {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    }

    fn on_remove(&mut self, id: u32, cause: RemovalCause) {
        if cause == RemovalCause::Caught {
            self.caught += 1;
        }
        log::debug!("remove #{} ({:?})", id, cause);
    }

    fn on_score_changed(&mut self, score: u32, speed: u32) {
        let speed_up = speed != self.hud.speed;
        self.hud.on_score_changed(score, speed);
        if speed_up {
            log::info!("Speed up! {}", self.hud.speed_text());
        }
    }

    fn on_missed_changed(&mut self, missed: u32) {
        self.hud.on_missed_changed(missed);
        log::info!("{}", self.hud.missed_text());
    }

    fn on_game_over(&mut self, reason: GameOverReason) {
        self.hud.on_game_over(reason);
        if let Some(banner) = self.hud.banner_text() {
            for line in banner.lines() {
                log::info!("{}", line);
            }
        }
    }

    fn on_reset(&mut self) {
        self.hud.on_reset();
    }
}

/// Chase the safe target closest to escaping unless a hazard sits near it
fn autopilot(state: &GameState) -> Option<Vec2> {
    let danger = SAFE_RADIUS + HAZARD_RADIUS * 2.0;
    state
        .safe_targets()
        .iter()
        .filter(|t| t.pos.y < state.field.height)
        .filter(|t| {
            !state
                .hazard_targets()
                .iter()
                .any(|h| h.pos.distance(t.pos) < danger)
        })
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|t| t.pos)
}

/// Drive the game until time runs out or the run ends
fn play(game: &mut Game, seconds: f64, presenter: &mut impl Presenter) {
    let total_frames = (seconds * 1000.0 / FRAME_MS).ceil() as u64;
    let mut pointer = game.state.cursor.pos;
    for _ in 0..total_frames {
        if let Some(target) = autopilot(&game.state) {
            pointer = target;
        }
        game.frame(Some(pointer), FRAME_MS, presenter);
        if game.state.is_game_over() {
            break;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = match cli.settings.as_deref().map(Settings::load) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(cursor) = cli.cursor {
        settings.cursor_policy = cursor.into();
    }

    log::info!("Circle Catch (headless) starting...");
    let mut game = match Game::new(&settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let presenter = if cli.json {
        let mut tee = JsonLines::new(std::io::stdout().lock(), LogPresenter::default());
        play(&mut game, cli.seconds, &mut tee);
        tee.inner
    } else {
        let mut presenter = LogPresenter::default();
        play(&mut game, cli.seconds, &mut presenter);
        presenter
    };

    log::info!(
        "Finished after {} ticks: {} {} {} (caught {})",
        game.state.time_ticks,
        presenter.hud.score_text(),
        presenter.hud.speed_text(),
        presenter.hud.missed_text(),
        presenter.caught
    );
}
