/// The player-controlled actor.

use std::io;

use crate::geometry::{Direction, Field, Rect};
use crate::input::HeldKeys;
use crate::render::{Canvas, Sprite};

/// Overrides the facing-based image for special moments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Normal,
    Victory,
    Defeated,
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub rect: Rect,
    /// Never zero: holds the last non-zero movement direction.
    pub facing: Direction,
    pub pose: Pose,
}

impl Actor {
    /// New actor centered on `center`, facing right.
    pub fn new(center: (i32, i32), size: (i32, i32)) -> Self {
        Actor {
            rect: Rect::centered_at(center.0, center.1, size.0, size.1),
            facing: Direction::Right,
            pose: Pose::Normal,
        }
    }

    /// Apply one frame of held movement keys.
    ///
    /// The summed step is all-or-nothing: if the moved rect is out of bounds
    /// on either axis the actor stays put.  Facing follows the attempted
    /// direction even when the move itself is rejected.
    pub fn apply_input(&mut self, held: &HeldKeys, field: &Field) {
        let step = held.displacement();
        let moved = self.rect.moved(step);
        if field.contains(&moved) {
            self.rect = moved;
        }
        if let Some(dir) = Direction::from_velocity(step) {
            self.facing = dir;
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn reset_pose(&mut self) {
        self.pose = Pose::Normal;
    }

    /// Sprite key for the current pose and facing.
    pub fn render_variant(&self) -> Sprite {
        match self.pose {
            Pose::Normal => Sprite::Actor(self.facing),
            Pose::Victory => Sprite::ActorVictory,
            Pose::Defeated => Sprite::ActorDefeated,
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> io::Result<()> {
        canvas.draw(self.render_variant(), self.rect)
    }

    /// Move for this frame, then draw.
    pub fn advance<C: Canvas + ?Sized>(
        &mut self,
        held: &HeldKeys,
        field: &Field,
        canvas: &mut C,
    ) -> io::Result<()> {
        self.apply_input(held, field);
        self.draw(canvas)
    }
}
