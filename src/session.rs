//! Session layer: start countdown, pause and overlay gating, and the
//! per-tick simulate → render pipeline.
//!
//! The session is the only mutator of the round state and the frame buffer.
//! Input commands and ticks arrive from the same loop, never concurrently.

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, move_player, player_shoot, reset, tick, toggle_pause};
use crate::difficulty::{Level, RoundSettings};
use crate::entities::{Direction, GameEvent, GameState};
use crate::frame::FrameBuffer;
use crate::render::{render, render_start_countdown};

/// Seconds shown by the start countdown.
pub const START_COUNTDOWN: u32 = 3;
const START_STEP_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Round built, waiting for start.
    Idle,
    /// 3-2-1 before play; the simulation is not ticked.
    Starting { remaining: u32, last_step_ms: u64 },
    Running,
}

/// Game-facing input, one per UI control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
    StartOrReset,
    SelectLevel(Level),
    ToggleOverlay,
}

pub struct Session<R: Rng> {
    state: GameState,
    phase: Phase,
    frame: FrameBuffer,
    overlay_open: bool,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(level: Level, settings: RoundSettings, rng: R) -> Self {
        let state = init_state(level, settings, 0);
        let mut frame = FrameBuffer::new();
        render(&mut frame, &state);
        Session {
            state,
            phase: Phase::Idle,
            frame,
            overlay_open: false,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// Frames go out to the panels only while the overlay is closed.
    pub fn should_send(&self) -> bool {
        !self.overlay_open
    }

    pub fn handle(&mut self, command: Command, now_ms: u64) {
        let playable = self.phase == Phase::Running && !self.state.paused;
        match command {
            Command::MoveLeft if playable => {
                self.state = move_player(&self.state, Direction::Left);
            }
            Command::MoveRight if playable => {
                self.state = move_player(&self.state, Direction::Right);
            }
            Command::Fire if playable => {
                self.state = player_shoot(&self.state, now_ms);
            }
            Command::TogglePause if self.phase == Phase::Running => {
                self.state = toggle_pause(&self.state);
                info!(paused = self.state.paused, "pause toggled");
            }
            Command::StartOrReset => match self.phase {
                Phase::Idle => {
                    self.phase = Phase::Starting {
                        remaining: START_COUNTDOWN,
                        last_step_ms: now_ms,
                    };
                    info!(level = self.state.level.label(), "start countdown");
                }
                Phase::Starting { .. } | Phase::Running => {
                    self.state = reset(&self.state, now_ms);
                    self.phase = Phase::Idle;
                    info!("round reset");
                }
            },
            Command::SelectLevel(level) if self.phase == Phase::Idle => {
                self.state = init_state(level, self.state.settings.clone(), now_ms);
                info!(level = level.label(), "difficulty selected");
            }
            Command::ToggleOverlay => {
                self.overlay_open = !self.overlay_open;
                self.state.paused = self.overlay_open;
            }
            _ => {}
        }
    }

    /// One scheduler tick: advance the phase or the simulation, redraw the
    /// frame buffer, and hand back the sound cues raised since last time.
    pub fn advance(&mut self, now_ms: u64) -> Vec<GameEvent> {
        match self.phase {
            Phase::Idle => {}
            Phase::Starting {
                remaining,
                last_step_ms,
            } => {
                if now_ms.saturating_sub(last_step_ms) >= START_STEP_MS {
                    let remaining = remaining.saturating_sub(1);
                    if remaining == 0 {
                        self.state = reset(&self.state, now_ms);
                        self.phase = Phase::Running;
                        info!("round started");
                    } else {
                        self.phase = Phase::Starting {
                            remaining,
                            last_step_ms: now_ms,
                        };
                    }
                }
            }
            Phase::Running => {
                let was_over = self.state.is_over();
                self.state = tick(&self.state, now_ms, &mut self.rng);
                if !was_over && self.state.is_over() {
                    info!(
                        score = self.state.score,
                        lives = self.state.player.lives,
                        countdown = self.state.countdown,
                        "game over"
                    );
                }
            }
        }

        render(&mut self.frame, &self.state);
        if let Phase::Starting { remaining, .. } = self.phase {
            render_start_countdown(&mut self.frame, remaining);
        }
        std::mem::take(&mut self.state.events)
    }
}
