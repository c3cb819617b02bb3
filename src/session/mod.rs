//! Game session orchestration
//!
//! A `Session` owns the loaded level, the phase state machine and the score.
//! The host drives it once per rendered frame with `frame(now)`, forwards key
//! events as they arrive, and drains `SessionEvent`s for its UI.

pub mod arena;
pub mod events;
pub mod phase;

pub use arena::{EntityHandle, LevelArena};
pub use events::{HudSnapshot, SessionEvent};
pub use phase::{GamePhase, Transition};

use std::collections::BTreeSet;

use crate::level::fixed::classic_level;
use crate::level::{ConfigError, GeneratedLevel, LevelGenerationParams, generate_level};
use crate::renderer::{EntityKind, RenderFrame, RenderHost};
use crate::settings::Settings;
use crate::sim::tick::{FrameClock, InputState, KeyCode, clamp_frame_dt};

/// Per-session status, rebuilt from scratch on every restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub phase: GamePhase,
    pub score: i64,
    pub current_level_seed: u32,
    /// Simulation ticks run on the current level
    pub ticks: u64,
}

impl SessionState {
    pub fn new(phase: GamePhase, seed: u32) -> Self {
        Self {
            phase,
            score: 0,
            current_level_seed: seed,
            ticks: 0,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// One play session over a render host
pub struct Session<H: RenderHost> {
    settings: Settings,
    host: H,
    state: SessionState,
    arena: LevelArena,
    input: InputState,
    clock: FrameClock,
    events: Vec<SessionEvent>,
    /// Enemies the player touched last tick
    touching: BTreeSet<usize>,
    last_hud: Option<HudSnapshot>,
    /// HUD updates failed once; stop trying
    hud_degraded: bool,
}

impl<H: RenderHost> Session<H> {
    /// Load the first level and hand its entities to `host`
    pub fn new(settings: Settings, mut host: H) -> Result<Self, ConfigError> {
        settings.level.validate()?;
        let level = load_level(&settings, settings.level.seed)?;
        let state = SessionState::new(GamePhase::MainMenu, level.seed);
        let arena = LevelArena::new(level, settings.level.fall_threshold_y, 1);
        spawn_all(&arena, &mut host);
        log::info!(
            "Session ready (seed {}, {} mode)",
            arena.seed(),
            if settings.use_procedural_level { "procedural" } else { "classic" }
        );

        let mut session = Self {
            settings,
            host,
            state,
            arena,
            input: InputState::default(),
            clock: FrameClock::default(),
            events: Vec::new(),
            touching: BTreeSet::new(),
            last_hud: None,
            hud_degraded: false,
        };
        session.refresh_hud();
        Ok(session)
    }

    // === Lifecycle ===

    /// Apply `transition`, returning the new phase if it was valid
    fn transition(&mut self, transition: Transition) -> Option<GamePhase> {
        match self.state.phase.apply(transition) {
            Some(next) => {
                self.state.phase = next;
                Some(next)
            }
            None => {
                log::debug!("Ignoring {:?} while {}", transition, self.state.phase.as_str());
                None
            }
        }
    }

    pub fn start(&mut self) {
        if self.transition(Transition::Start).is_some() {
            self.clock.reset();
            self.events.push(SessionEvent::Started);
            log::info!("Session started");
        }
    }

    pub fn pause(&mut self) {
        if self.transition(Transition::Pause).is_some() {
            self.events.push(SessionEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.transition(Transition::Resume).is_some() {
            // Time spent paused never reaches the simulation
            self.clock.reset();
            self.events.push(SessionEvent::Resumed);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            phase => log::debug!("Ignoring pause toggle while {}", phase.as_str()),
        }
    }

    /// Restart the current level from its seed with a zeroed score
    pub fn restart(&mut self) {
        if self.transition(Transition::Restart).is_some() {
            self.reload(false);
        }
    }

    /// Replace the level with a freshly seeded one. Without procedural
    /// generation this is a plain restart.
    pub fn request_new_level(&mut self) {
        if !self.settings.use_procedural_level {
            self.restart();
            return;
        }
        if self.transition(Transition::NewLevel).is_some() {
            self.reload(true);
        }
    }

    /// Tear down the arena and build the next one. Ends the current tick.
    fn reload(&mut self, new_level: bool) {
        let seed = if new_level {
            None
        } else {
            Some(self.state.current_level_seed)
        };
        let level = match load_level(&self.settings, seed) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Level reload failed, keeping the current level: {}", e);
                return;
            }
        };

        for handle in self.arena.live_handles() {
            self.host.dispose(handle);
        }
        let generation = self.arena.generation().wrapping_add(1);
        self.arena = LevelArena::new(level, self.settings.level.fall_threshold_y, generation);
        spawn_all(&self.arena, &mut self.host);

        let previous_score = self.state.score;
        self.state = SessionState::new(GamePhase::Playing, self.arena.seed());
        self.touching.clear();
        self.clock.reset();

        log::info!(
            "Restarted on {} level (seed {})",
            if new_level { "a new" } else { "the same" },
            self.arena.seed()
        );
        self.events.push(SessionEvent::Restarted {
            seed: self.arena.seed(),
            new_level,
        });
        if previous_score != 0 {
            self.events.push(SessionEvent::ScoreChanged { score: 0 });
        }
    }

    // === Input ===

    /// Keys are tracked in every phase so nothing sticks across a pause
    pub fn key_down(&mut self, key: KeyCode) {
        self.input.press(key);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.input.release(key);
    }

    /// Drop every held key (focus loss)
    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    // === Simulation ===

    /// Advance the simulation by `dt` seconds (clamped). No-op unless playing.
    pub fn tick(&mut self, dt: f32) {
        let dt = clamp_frame_dt(dt);
        if !self.state.phase.is_playing() {
            return;
        }

        self.state.ticks += 1;
        let report = self.arena.step(&self.input, dt);

        if !report.collected.is_empty() {
            for &index in &report.collected {
                let handle = self.arena.handle(EntityKind::Collectible, index);
                self.host.dispose(handle);
                self.events.push(SessionEvent::Collected { handle });
            }
            self.add_score(report.collected.len() as i64);
        }

        let touching: BTreeSet<usize> = report.touching_enemies.iter().copied().collect();
        for &index in touching.difference(&self.touching) {
            let handle = self.arena.handle(EntityKind::Enemy, index);
            self.events.push(SessionEvent::EnemyContact { handle });
        }
        self.touching = touching;

        if report.out_of_bounds && self.transition(Transition::FallOutOfBounds).is_some() {
            log::info!("Game over with score {}", self.state.score);
            self.events.push(SessionEvent::GameOver {
                score: self.state.score,
            });
        }
    }

    /// Run one host frame: tick by the elapsed wall-clock time, present the
    /// result and refresh the HUD. Paused and game-over sessions still present.
    pub fn frame(&mut self, now_secs: f64) {
        let dt = self.clock.advance(now_secs);
        self.tick(dt);
        let frame = self.render_frame();
        self.host.present(&frame);
        self.refresh_hud();
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(self.arena.world(), self.settings.player_color.rgba())
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score,
            phase: self.state.phase,
            seed: self.state.current_level_seed,
            collectibles_remaining: self.arena.world().collectibles_remaining(),
        }
    }

    fn refresh_hud(&mut self) {
        if self.hud_degraded {
            return;
        }
        let hud = self.hud();
        if self.last_hud == Some(hud) {
            return;
        }
        match self.host.update_hud(&hud) {
            Ok(()) => self.last_hud = Some(hud),
            Err(e) => {
                log::warn!("HUD unavailable, continuing without it: {}", e);
                self.hud_degraded = true;
            }
        }
    }

    // === Score ===

    pub fn score(&self) -> i64 {
        self.state.score
    }

    /// Overwrite the score (testing and resets; gameplay only adds)
    pub fn set_score(&mut self, score: i64) {
        if self.state.score != score {
            self.state.score = score;
            self.events.push(SessionEvent::ScoreChanged { score });
        }
    }

    /// Add `delta` to the score. Negative deltas are allowed.
    pub fn add_score(&mut self, delta: i64) {
        self.set_score(self.state.score.saturating_add(delta));
    }

    // === Accessors ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn level_seed(&self) -> u32 {
        self.state.current_level_seed
    }

    pub fn arena(&self) -> &LevelArena {
        &self.arena
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Build a level for `settings`, from `seed` when given
fn load_level(settings: &Settings, seed: Option<u32>) -> Result<GeneratedLevel, ConfigError> {
    if !settings.use_procedural_level {
        return Ok(classic_level(&settings.level));
    }
    let params = LevelGenerationParams {
        seed,
        ..settings.level.clone()
    };
    let level = generate_level(&params)?;
    if settings.development_mode {
        log::debug!(
            "Level detail: spawn {:?} on platform {}, gaps {:?}",
            level.spawn_point,
            level.spawn_platform,
            level.gaps
        );
    }
    Ok(level)
}

fn spawn_all<H: RenderHost>(arena: &LevelArena, host: &mut H) {
    for handle in arena.live_handles() {
        host.spawn(handle, handle.kind);
    }
}
