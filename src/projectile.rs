/// Beams fired by the actor.

use std::io;

use crate::actor::Actor;
use crate::geometry::{Direction, Field, Rect, Velocity, STEP};
use crate::render::{Canvas, Sprite};

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    /// Copied from the actor at spawn time; never changes afterwards.
    pub heading: Direction,
    /// Presentation-only rotation, degrees counter-clockwise from +x.
    pub angle: f64,
    /// Set when the beam hits a hazard; cleared out at the next compaction.
    pub consumed: bool,
}

impl Projectile {
    /// Fire from `actor`'s current facing.
    ///
    /// `beam_size` is the unrotated image size (pointing right).  The rect is
    /// the bounding box of that image rotated to the heading, centered one
    /// actor-size ahead of the actor's center.
    pub fn spawn(actor: &Actor, beam_size: (i32, i32)) -> Self {
        let heading = actor.facing;
        let angle = heading.angle_degrees();
        let (w, h) = rotated_bounds(beam_size, angle);

        let v = heading.velocity();
        let (acx, acy) = actor.rect.center();
        let cx = acx + actor.rect.width * v.dx / STEP;
        let cy = acy + actor.rect.height * v.dy / STEP;

        Projectile {
            rect: Rect::centered_at(cx, cy, w, h),
            heading,
            angle,
            consumed: false,
        }
    }

    pub fn velocity(&self) -> Velocity {
        self.heading.velocity()
    }

    /// Out of bounds is terminal: such a beam no longer moves or draws.
    pub fn is_expired(&self, field: &Field) -> bool {
        !field.contains(&self.rect)
    }

    pub fn advance<C: Canvas + ?Sized>(&mut self, field: &Field, canvas: &mut C) -> io::Result<()> {
        if self.is_expired(field) {
            return Ok(());
        }
        self.rect = self.rect.moved(self.velocity());
        if !self.is_expired(field) {
            canvas.draw(Sprite::Projectile(self.heading), self.rect)?;
        }
        Ok(())
    }
}

/// Axis-aligned bounds of a `w x h` box rotated by `angle` degrees.
fn rotated_bounds((w, h): (i32, i32), angle: f64) -> (i32, i32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (w, h) = (f64::from(w), f64::from(h));
    let bw = (w * cos).abs() + (h * sin).abs();
    let bh = (w * sin).abs() + (h * cos).abs();
    (bw.round() as i32, bh.round() as i32)
}
