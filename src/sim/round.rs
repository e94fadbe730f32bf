//! Round lifecycle and the per-frame tick
//!
//! `Round` owns every piece of round state and is the only thing that mutates
//! it. The host calls `tick` once per animation frame with the current
//! timestamp and playfield size, and applies input commands between ticks.
//! Calls that make no sense in the current phase are ignored.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::RoundClock;
use super::collision::{ItemTrack, avatar_box, detect_contacts};
use super::command::{Command, CommandInbox};
use super::difficulty::Difficulty;
use super::items::{FallingItem, ItemKind, ItemRegistry, ItemView};
use super::player::{Direction, PlayerAvatar};
use super::scoring::{ContactOutcome, apply_contact, is_out_of_lives};
use super::spawner::{SpawnRoll, Spawner};
use super::state::{EndReason, GameEvent, Phase, Playfield, RoundEnd, RoundState, Snapshot};
use crate::settings::Settings;

/// Undrained events kept per round; the oldest are dropped past this
pub const MAX_PENDING_EVENTS: usize = 256;

#[derive(Debug, Clone)]
pub struct Round<R: Rng = Pcg32> {
    settings: Settings,
    state: RoundState,
    /// Present from the first start onward
    clock: Option<RoundClock>,
    spawner: Spawner,
    items: ItemRegistry,
    avatar: PlayerAvatar,
    field: Playfield,
    rng: R,
    /// Pending events for the current round, drained by the host
    events: Vec<GameEvent>,
}

impl Round<Pcg32> {
    /// Create an idle round using a PCG generator seeded from the settings
    pub fn new(settings: Settings, field: Playfield) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self::with_rng(settings, field, rng)
    }
}

impl<R: Rng> Round<R> {
    /// Create an idle round with an injected random source
    pub fn with_rng(settings: Settings, field: Playfield, rng: R) -> Self {
        let settings = settings.sanitized();
        let mut avatar = PlayerAvatar::new(settings.avatar_width, settings.avatar_height);
        avatar.center_in(&field);
        let state = RoundState {
            lives: settings.starting_lives,
            time_left_secs: settings.round_length_secs.ceil() as u32,
            ..RoundState::idle()
        };

        Self {
            settings,
            state,
            clock: None,
            spawner: Spawner::new(0.0),
            items: ItemRegistry::new(),
            avatar,
            field,
            rng,
            events: Vec::new(),
        }
    }

    // === Transitions ===

    /// Begin a round. Only valid from `Idle` or `Ended`.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.state.phase {
            phase if phase == Phase::Idle || phase.is_ended() => {
                self.begin(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Abandon whatever is in progress and begin a fresh round
    pub fn restart(&mut self, now_ms: f64) {
        self.begin(now_ms);
    }

    /// Only valid while playing
    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        if let Some(clock) = self.clock.as_mut() {
            clock.pause(now_ms);
        }
        self.state.phase = Phase::Paused;
        self.emit(GameEvent::Paused);
        log::info!("Round paused ({}s left)", self.state.time_left_secs);
        true
    }

    /// Only valid while paused. Everything time-based continues exactly where
    /// it stopped.
    pub fn resume(&mut self, now_ms: f64) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        let paused_for = self
            .clock
            .as_mut()
            .and_then(|clock| clock.resume(now_ms))
            .unwrap_or(0.0);
        self.items.shift(paused_for);
        self.spawner.shift(paused_for);
        self.state.phase = Phase::Playing;
        self.emit(GameEvent::Resumed);
        log::info!("Round resumed after {:.0}ms", paused_for);
        true
    }

    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.state.phase {
            Phase::Playing => self.pause(now_ms),
            Phase::Paused => self.resume(now_ms),
            _ => false,
        }
    }

    // === Input ===

    /// Directional tap. Only accepted while playing.
    pub fn move_avatar(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        self.avatar
            .step(direction, self.settings.move_step_scale, &self.field);
        true
    }

    /// Drag-style placement of the avatar's left edge. Only accepted while playing.
    pub fn set_avatar_position(&mut self, x: f32) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        self.avatar.set_position(x, &self.field);
        true
    }

    /// Apply one command from the input layer
    pub fn apply(&mut self, command: Command, now_ms: f64) -> bool {
        match command {
            Command::Move(direction) => self.move_avatar(direction),
            Command::SetPosition(x) => self.set_avatar_position(x),
            Command::Pause => self.pause(now_ms),
            Command::Resume => self.resume(now_ms),
            Command::TogglePause => self.toggle_pause(now_ms),
            Command::Restart => {
                self.restart(now_ms);
                true
            }
        }
    }

    // === Simulation ===

    /// Advance one frame. Returns the termination notice if the round ended
    /// during this tick. Does nothing unless playing.
    pub fn tick(&mut self, now_ms: f64, field: Playfield) -> Option<RoundEnd> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        let clock = self.clock.as_ref()?;

        self.field = field;
        self.avatar.clamp_to(&self.field);

        // Clock
        self.state.ramp_elapsed_secs = clock.elapsed_secs(now_ms);
        self.state.time_left_secs = clock.time_left_secs(now_ms);
        let expired = clock.is_expired(now_ms);

        // Difficulty
        let difficulty = Difficulty::at(self.state.ramp_elapsed_secs);
        self.avatar.speed = difficulty.player_speed;

        // Spawn
        let span = self.field.width - self.settings.item_size;
        if let Some(roll) = self.spawner.poll(now_ms, &difficulty, span, &mut self.rng) {
            self.admit(roll);
        }

        // Advance / retire
        self.items.retire(now_ms);

        // Collide
        let track = self.track();
        let avatar = avatar_box(&self.avatar, &self.field, self.settings.avatar_bottom_margin);
        let contacts = detect_contacts(
            &mut self.items,
            &avatar,
            &track,
            now_ms,
            self.settings.caught_linger_ms,
        );

        // Score
        for contact in contacts {
            self.resolve(contact.id, contact.kind, &difficulty);
            if is_out_of_lives(&self.state) {
                break;
            }
        }

        // Lives are checked before time
        if is_out_of_lives(&self.state) {
            return Some(self.end(EndReason::OutOfLives));
        }
        if expired {
            return Some(self.end(EndReason::TimeExpired));
        }
        None
    }

    /// Drain queued commands, then tick
    pub fn tick_with_inbox(
        &mut self,
        inbox: &CommandInbox,
        now_ms: f64,
        field: Playfield,
    ) -> Option<RoundEnd> {
        self.field = field;
        for command in inbox.drain() {
            self.apply(command, now_ms);
        }
        self.tick(now_ms, field)
    }

    /// Apply a contact outside the collision pipeline (scripted play, replays).
    /// Events for injected contacts carry item id 0. Only valid while playing.
    pub fn inject_contact(&mut self, kind: ItemKind, now_ms: f64) -> Option<RoundEnd> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        let ramp = self.clock.as_ref()?.elapsed_secs(now_ms);
        self.state.ramp_elapsed_secs = ramp;
        let difficulty = Difficulty::at(ramp);
        self.resolve(0, kind, &difficulty);

        if is_out_of_lives(&self.state) {
            return Some(self.end(EndReason::OutOfLives));
        }
        None
    }

    /// Place an item at a chosen position, bypassing the spawner's cadence and
    /// RNG. Only valid while playing.
    pub fn spawn_item(&mut self, kind: ItemKind, x: f32, now_ms: f64) -> Option<u32> {
        if self.state.phase != Phase::Playing {
            return None;
        }
        let ramp = self.clock.as_ref()?.elapsed_secs(now_ms);
        let span = (self.field.width - self.settings.item_size).max(0.0);
        let roll = SpawnRoll {
            kind,
            style: None,
            x: x.clamp(0.0, span),
            spawned_at_ms: now_ms,
            fall_duration_secs: Difficulty::at(ramp).fall_duration_secs,
        };
        Some(self.admit(roll))
    }

    // === Queries ===

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn avatar(&self) -> &PlayerAvatar {
        &self.avatar
    }

    pub fn playfield(&self) -> Playfield {
        self.field
    }

    pub fn items(&self) -> &[FallingItem] {
        self.items.items()
    }

    /// Render descriptors for every live item
    pub fn item_views(&self, now_ms: f64) -> Vec<ItemView> {
        self.items.views(now_ms)
    }

    /// Vertical path items follow in the current playfield
    pub fn track(&self) -> ItemTrack {
        ItemTrack {
            item_size: self.settings.item_size,
            exit_margin: self.settings.exit_margin,
            field_height: self.field.height,
        }
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Internals ===

    fn begin(&mut self, now_ms: f64) {
        // Whatever the host left undrained belongs to the abandoned round
        self.events.clear();
        self.state = RoundState::fresh(self.settings.starting_lives, self.settings.round_length_secs);
        self.items.clear();
        self.clock = Some(RoundClock::start(now_ms, self.settings.round_length_secs));
        self.spawner = Spawner::new(now_ms);
        self.avatar.speed = Difficulty::at(0.0).player_speed;
        self.avatar.center_in(&self.field);
        self.emit(GameEvent::RoundStarted);
        log::info!(
            "Round started ({}s, {} lives)",
            self.state.time_left_secs,
            self.state.lives
        );
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn admit(&mut self, roll: SpawnRoll) -> u32 {
        let kind = roll.kind;
        let id = self.items.admit(roll);
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, roll.x);
        self.emit(GameEvent::ItemSpawned { id, kind });
        id
    }

    fn resolve(&mut self, id: u32, kind: ItemKind, difficulty: &Difficulty) {
        match apply_contact(&mut self.state, kind, difficulty) {
            ContactOutcome::GiftScored { points } => {
                log::debug!("Caught gift #{} for {} points", id, points);
                self.emit(GameEvent::GiftCaught { id, points });
            }
            ContactOutcome::LifeLost { lives_left } => {
                log::debug!("Hit hazard #{}, {} lives left", id, lives_left);
                self.emit(GameEvent::HazardHit { id, lives_left });
            }
        }
    }

    fn end(&mut self, reason: EndReason) -> RoundEnd {
        let end = RoundEnd {
            reason,
            final_score: self.state.score,
        };
        self.state.phase = Phase::Ended(reason);
        self.items.clear();
        self.emit(GameEvent::RoundEnded(end));
        log::info!("Round ended: {:?}, final score {}", reason, end.final_score);
        end
    }
}
