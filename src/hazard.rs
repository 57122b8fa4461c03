/// Bouncing hazards.

use std::io;

use rand::Rng;

use crate::geometry::{check_bound, Field, Rect, Velocity, STEP};
use crate::render::{Canvas, Rgb, Sprite};

#[derive(Clone, Debug)]
pub struct Hazard {
    pub rect: Rect,
    pub velocity: Velocity,
    pub colour: Rgb,
    pub radius: i32,
    /// Set when a beam hits this hazard; cleared out at the next compaction.
    pub consumed: bool,
}

impl Hazard {
    /// A `2r x 2r` hazard at a random spot fully inside `field`, heading
    /// down-right.  Placement ignores the actor and other hazards.
    pub fn spawn(colour: Rgb, radius: i32, field: &Field, rng: &mut impl Rng) -> Self {
        let size = radius * 2;
        let x = rng.gen_range(0..=(field.width - size).max(0));
        let y = rng.gen_range(0..=(field.height - size).max(0));
        Hazard::new(Rect::new(x, y, size, size), Velocity::new(STEP, STEP), colour)
    }

    pub fn new(rect: Rect, velocity: Velocity, colour: Rgb) -> Self {
        Hazard {
            rect,
            velocity,
            colour,
            radius: rect.width / 2,
            consumed: false,
        }
    }

    /// Bounce, move, draw.
    ///
    /// Each axis is checked against where the hazard would land; an axis that
    /// would leave the field has its velocity component negated, and the move
    /// uses the flipped velocity in the same tick.
    pub fn advance<C: Canvas + ?Sized>(&mut self, field: &Field, canvas: &mut C) -> io::Result<()> {
        let (horizontal, vertical) = check_bound(&self.rect.moved(self.velocity), field);
        if !horizontal {
            self.velocity.dx = -self.velocity.dx;
        }
        if !vertical {
            self.velocity.dy = -self.velocity.dy;
        }
        self.rect = self.rect.moved(self.velocity);

        canvas.draw(
            Sprite::Hazard {
                colour: self.colour,
                radius: self.radius,
            },
            self.rect,
        )
    }
}
