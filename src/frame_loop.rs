/// The per-frame orchestrator.
///
/// `step` runs one frame of the simulation in a fixed order; `run` drives
/// `step` against real collaborators and handles pacing.  The order of the
/// phases inside `step` is observable: collision checks see the actor where
/// it ended the previous frame, and a game-over contact pre-empts any beam
/// hits in the same frame.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::actor::{Actor, Pose};
use crate::config::GameConfig;
use crate::effect::Effect;
use crate::error::GameError;
use crate::geometry::Field;
use crate::hazard::Hazard;
use crate::input::{InputSnapshot, InputSource};
use crate::projectile::Projectile;
use crate::render::{Anchor, Canvas, Label, Rgb, Sprite, TextStyle};
use crate::score::ScoreTracker;

pub const GAME_OVER_TEXT: &str = "Game Over";

const GAME_OVER_STYLE: TextStyle = TextStyle {
    size: 80,
    colour: Rgb::RED,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The player asked to quit; nothing else ran this frame.
    Quit,
    /// The actor touched a hazard; the game-over frame has been presented.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    GameOver,
}

/// How a session finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ending {
    pub reason: EndReason,
    pub score: u32,
    pub frames: u64,
}

// ── Pacing ───────────────────────────────────────────────────────────────────

/// Real-time waits, kept behind a trait so tests can run frames instantly.
pub trait Pacer {
    /// Called before input is polled.
    fn frame_start(&mut self);

    /// Sleep out whatever is left of the frame budget.
    fn frame_end(&mut self);

    /// Blocking hold, used once before the game-over exit.
    fn hold(&mut self, duration: Duration);
}

pub struct RealtimePacer {
    budget: Duration,
    started: Instant,
}

impl RealtimePacer {
    pub fn new(budget: Duration) -> Self {
        RealtimePacer {
            budget,
            started: Instant::now(),
        }
    }
}

impl Pacer for RealtimePacer {
    fn frame_start(&mut self) {
        self.started = Instant::now();
    }

    fn frame_end(&mut self) {
        let elapsed = self.started.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        }
    }

    fn hold(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ── Frame loop ───────────────────────────────────────────────────────────────

/// Owns every entity for the life of one game.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    pub config: GameConfig,
    pub field: Field,
    pub actor: Actor,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub effects: Vec<Effect>,
    pub score: ScoreTracker,
    pub frame: u64,
}

impl FrameLoop {
    /// Fresh game: actor at the configured start, `hazard_count` hazards at
    /// random positions.  All randomness comes through `rng`.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let field = config.field();
        let hazards = (0..config.hazard_count)
            .map(|_| Hazard::spawn(config.hazard_colour, config.hazard_radius, &field, rng))
            .collect();
        FrameLoop::with_hazards(config, hazards)
    }

    /// Fresh game with an explicit hazard list.
    pub fn with_hazards(config: GameConfig, hazards: Vec<Hazard>) -> Self {
        let field = config.field();
        FrameLoop {
            actor: Actor::new(config.actor_start, config.actor_size),
            projectiles: Vec::new(),
            hazards,
            effects: Vec::new(),
            score: ScoreTracker::new(field.height),
            frame: 0,
            field,
            config,
        }
    }

    pub fn fire(&mut self) {
        let beam = Projectile::spawn(&self.actor, self.config.beam_size);
        debug!("beam fired heading {:?} at {:?}", beam.heading, beam.rect);
        self.projectiles.push(beam);
    }

    /// Run one frame against `input`, drawing to `canvas`.
    pub fn step<C: Canvas + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        canvas: &mut C,
    ) -> io::Result<FrameOutcome> {
        // ── 1. Discrete events ───────────────────────────────────────────────
        if input.quit_requested() {
            return Ok(FrameOutcome::Quit);
        }
        for _ in 0..input.fire_count() {
            self.fire();
        }
        self.actor.reset_pose();

        // ── 2. Background ────────────────────────────────────────────────────
        canvas.draw(Sprite::Background, self.field.rect())?;

        // ── 3. Actor ↔ hazard: ends the game, skips the rest ────────────────
        if self.hazards.iter().any(|h| h.rect.overlaps(&self.actor.rect)) {
            self.actor.set_pose(Pose::Defeated);
            self.actor.draw(canvas)?;
            canvas.draw_label(&self.game_over_label())?;
            canvas.present()?;
            return Ok(FrameOutcome::GameOver);
        }

        // ── 4. Beam ↔ hazard ─────────────────────────────────────────────────
        let explosions = self.resolve_hits(canvas)?;

        // ── 5. Compaction ────────────────────────────────────────────────────
        let field = self.field;
        self.projectiles.retain(|p| !p.consumed && !p.is_expired(&field));
        self.hazards.retain(|h| !h.consumed);

        // ── 6. Actor moves for the next visual frame ─────────────────────────
        self.actor.advance(&input.held, &field, canvas)?;

        // ── 7. Beams, then hazards ───────────────────────────────────────────
        for beam in &mut self.projectiles {
            beam.advance(&field, canvas)?;
        }
        for hazard in &mut self.hazards {
            hazard.advance(&field, canvas)?;
        }

        // ── 8. Explosions ────────────────────────────────────────────────────
        self.effects.retain(Effect::is_active);
        for effect in &mut self.effects {
            effect.advance(canvas)?;
        }
        // Explosions from this frame's hits start animating next frame.
        self.effects.extend(explosions);

        // ── 9–10. Score, present ─────────────────────────────────────────────
        canvas.draw_label(self.score.label())?;
        canvas.present()?;
        self.frame += 1;
        Ok(FrameOutcome::Continue)
    }

    /// First-match-wins pairing in insertion order: a consumed beam or hazard
    /// is skipped for the rest of the scan.  Returns one explosion per hit.
    fn resolve_hits<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> io::Result<Vec<Effect>> {
        let mut explosions = Vec::new();
        for beam in self.projectiles.iter_mut() {
            if beam.consumed {
                continue;
            }
            let Some(hazard) = self
                .hazards
                .iter_mut()
                .find(|h| !h.consumed && beam.rect.overlaps(&h.rect))
            else {
                continue;
            };

            beam.consumed = true;
            hazard.consumed = true;
            self.score.increase_by_one();
            explosions.push(Effect::spawn(
                hazard.rect.center(),
                self.config.explosion_size,
                self.config.effect_lifetime,
            ));
            debug!(
                "hazard destroyed at {:?}, score {}",
                hazard.rect,
                self.score.current_value()
            );

            self.actor.set_pose(Pose::Victory);
            self.actor.draw(canvas)?;
            canvas.present()?;
        }
        Ok(explosions)
    }

    fn game_over_label(&self) -> Label {
        Label {
            text: GAME_OVER_TEXT.to_string(),
            style: GAME_OVER_STYLE,
            position: (self.field.width / 2 - 150, self.field.height / 2),
            anchor: Anchor::TopLeft,
        }
    }

    /// Drive frames until the player quits or the actor is hit.
    pub fn run<I, C, P>(
        &mut self,
        input: &mut I,
        canvas: &mut C,
        pacer: &mut P,
    ) -> Result<Ending, GameError>
    where
        I: InputSource + ?Sized,
        C: Canvas + ?Sized,
        P: Pacer + ?Sized,
    {
        info!(
            "starting: field {}x{}, {} hazards, {} fps",
            self.field.width,
            self.field.height,
            self.hazards.len(),
            self.config.fps
        );

        loop {
            pacer.frame_start();
            let snapshot = input.poll()?;
            match self.step(&snapshot, canvas)? {
                FrameOutcome::Continue => pacer.frame_end(),
                FrameOutcome::Quit => {
                    info!("quit after {} frames", self.frame);
                    return Ok(self.ending(EndReason::Quit));
                }
                FrameOutcome::GameOver => {
                    info!(
                        "game over after {} frames, score {}",
                        self.frame,
                        self.score.current_value()
                    );
                    pacer.hold(self.config.game_over_hold);
                    return Ok(self.ending(EndReason::GameOver));
                }
            }
        }
    }

    fn ending(&self, reason: EndReason) -> Ending {
        Ending {
            reason,
            score: self.score.current_value(),
            frames: self.frame,
        }
    }
}
