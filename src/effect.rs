/// Explosion left behind by a destroyed hazard.

use std::io;

use crate::geometry::Rect;
use crate::render::{Canvas, Sprite};

pub const DEFAULT_LIFETIME: u32 = 20;

/// Ticks spent on each of the two animation frames.
const PHASE_TICKS: usize = 10;
const CYCLE_TICKS: usize = PHASE_TICKS * 2;

#[derive(Clone, Debug)]
pub struct Effect {
    pub rect: Rect,
    /// Frames left to display.
    pub remaining: u32,
    /// Animation counter, wraps every `CYCLE_TICKS`.
    pub tick: usize,
}

impl Effect {
    pub fn spawn(center: (i32, i32), size: (i32, i32), lifetime: u32) -> Self {
        Effect {
            rect: Rect::centered_at(center.0, center.1, size.0, size.1),
            remaining: lifetime,
            tick: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn phase(&self) -> usize {
        self.tick / PHASE_TICKS
    }

    pub fn advance<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> io::Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        canvas.draw(Sprite::Explosion { phase: self.phase() }, self.rect)?;
        self.tick = (self.tick + 1) % CYCLE_TICKS;
        self.remaining -= 1;
        Ok(())
    }
}
