//! Gift Catch headless driver
//!
//! Plays one round with a simple autopilot against a synthetic 60 Hz clock and
//! logs the HUD once per second. Useful for watching the difficulty ramp
//! without a renderer.
//!
//! Usage: `gift-catch [seed]`. Set `GIFT_CATCH_SETTINGS` to a JSON file to
//! override round settings, `GIFT_CATCH_HIGHSCORES` to choose where the
//! leaderboard is kept, and `RUST_LOG=debug` to see every spawn and catch.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use gift_catch::sim::{
        Command, CommandInbox, Direction, GameEvent, ItemKind, Playfield, Round, RoundEnd,
    };
    use gift_catch::{HighScores, Settings};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Autopilot taps at most this often (frames)
    const TAP_EVERY_FRAMES: u64 = 6;

    /// `GIFT_CATCH_HIGHSCORES`, or a file in the working directory
    fn high_scores_path() -> PathBuf {
        std::env::var_os("GIFT_CATCH_HIGHSCORES")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("gift_catch_highscores.json"))
    }

    fn wall_clock_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    fn load_settings() -> Settings {
        let mut settings = match std::env::var("GIFT_CATCH_SETTINGS") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Settings::from_json_or_default(&json),
                Err(e) => {
                    log::warn!("Could not read settings from {}: {}", path, e);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        if let Some(seed) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
            settings.seed = seed;
        }
        settings
    }

    /// Pick a tap: dodge the most urgent hazard, otherwise chase the lowest gift
    fn autopilot(round: &Round, now_ms: f64) -> Option<Direction> {
        let avatar = round.avatar();
        let field = round.playfield();
        let size = round.settings().item_size;
        let center = avatar.center_x();
        let step = avatar.speed * round.settings().move_step_scale;
        let views = round.item_views(now_ms);

        let threat = views
            .iter()
            .filter(|v| v.kind == ItemKind::Hazard && !v.taken)
            .filter(|v| v.progress > 0.45 && v.progress < 0.95)
            .filter(|v| (v.x + size / 2.0 - center).abs() < (avatar.width + size) / 2.0)
            .max_by(|a, b| a.progress.total_cmp(&b.progress));
        if let Some(hazard) = threat {
            let away = if hazard.x + size / 2.0 >= center {
                Direction::Left
            } else {
                Direction::Right
            };
            let pinned = match away {
                Direction::Left => avatar.x <= 0.0,
                Direction::Right => avatar.x >= avatar.max_x(&field),
            };
            return Some(match (away, pinned) {
                (Direction::Left, true) => Direction::Right,
                (Direction::Right, true) => Direction::Left,
                (dir, false) => dir,
            });
        }

        let target = views
            .iter()
            .filter(|v| v.kind == ItemKind::Gift && !v.taken && v.progress < 0.85)
            .max_by(|a, b| a.progress.total_cmp(&b.progress))?;
        let diff = target.x + size / 2.0 - center;
        if diff.abs() <= step / 2.0 {
            None
        } else if diff > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    }

    fn play(round: &mut Round, field: Playfield) -> (RoundEnd, f64) {
        let inbox = CommandInbox::new();
        let input = inbox.sender();
        let mut now = 0.0;
        let mut frame: u64 = 0;
        let mut last_second = None;

        round.start(now);
        loop {
            now += FRAME_MS;
            frame += 1;

            if frame % TAP_EVERY_FRAMES == 0 {
                if let Some(direction) = autopilot(round, now) {
                    input.send(Command::Move(direction));
                }
            }

            let ended = round.tick_with_inbox(&inbox, now, field);

            for event in round.drain_events() {
                match event {
                    GameEvent::GiftCaught { points, .. } => log::debug!("+{} points", points),
                    GameEvent::HazardHit { lives_left, .. } => {
                        log::warn!("Hit coal! {} lives left", lives_left)
                    }
                    _ => {}
                }
            }

            if let Some(end) = ended {
                return (end, now);
            }

            let snapshot = round.snapshot();
            if last_second != Some(snapshot.time_left_secs) {
                last_second = Some(snapshot.time_left_secs);
                log::info!("{} ({} items falling)", snapshot.announcement(), round.items().len());
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Gift Catch (headless) starting...");

        let settings = load_settings();
        log::info!("Seed: {}", settings.seed);

        let field = Playfield::new(800.0, 600.0);
        let mut round = Round::new(settings, field);
        let scores_path = high_scores_path();
        let mut high_scores = HighScores::load(&scores_path);

        let (end, _) = play(&mut round, field);
        let rank = high_scores.record(&end, wall_clock_ms());
        if rank.is_some() {
            if let Err(e) = high_scores.save(&scores_path) {
                log::warn!("Could not save high scores to {}: {}", scores_path.display(), e);
            }
        }

        let suffix = match rank {
            Some(1) => " - new high score!".to_string(),
            Some(r) => format!(" - #{} on the board", r),
            None => String::new(),
        };
        println!(
            "Round over ({:?}) - final score {}{}",
            end.reason, end.final_score, suffix
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
