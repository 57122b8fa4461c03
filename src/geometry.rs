/// Field-space primitives shared by every entity: rectangles, velocities,
/// the eight facing directions, and the bounds check.

// ── Rectangle ────────────────────────────────────────────────────────────────

/// Axis-aligned box in field pixels.  `x`/`y` are the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// Build a rect of the given size whose center lands on `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Rect {
            x: cx - width / 2,
            y: cy - height / 2,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Return a copy shifted by `v`.
    pub fn moved(&self, v: Velocity) -> Rect {
        Rect {
            x: self.x + v.dx,
            y: self.y + v.dy,
            ..*self
        }
    }

    /// Strict overlap: rectangles that merely share an edge do not collide,
    /// and an empty rectangle never collides with anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Velocity & direction ─────────────────────────────────────────────────────

/// Step size for the actor and for projectiles, in pixels per frame.
pub const STEP: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Velocity { dx, dy }
    }
}

impl std::ops::Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// The eight facing directions, listed counter-clockwise from 0° (right).
/// Screen y grows downward, so "up" is a negative `dy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Stable slot in `ALL`, used to index orientation tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn velocity(self) -> Velocity {
        match self {
            Direction::Right => Velocity::new(STEP, 0),
            Direction::UpRight => Velocity::new(STEP, -STEP),
            Direction::Up => Velocity::new(0, -STEP),
            Direction::UpLeft => Velocity::new(-STEP, -STEP),
            Direction::Left => Velocity::new(-STEP, 0),
            Direction::DownLeft => Velocity::new(-STEP, STEP),
            Direction::Down => Velocity::new(0, STEP),
            Direction::DownRight => Velocity::new(STEP, STEP),
        }
    }

    /// Inverse of [`Direction::velocity`]; `None` for the zero vector and for
    /// anything that is not one of the eight step vectors.
    pub fn from_velocity(v: Velocity) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.velocity() == v)
    }

    /// Angle of the direction in degrees, counter-clockwise from +x with the
    /// y axis flipped to point up.
    pub fn angle_degrees(self) -> f64 {
        let v = self.velocity();
        f64::from(-v.dy).atan2(f64::from(v.dx)).to_degrees()
    }

    /// Short name used as the logical resource key (`"up_left"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::UpRight => "up_right",
            Direction::Up => "up",
            Direction::UpLeft => "up_left",
            Direction::Left => "left",
            Direction::DownLeft => "down_left",
            Direction::Down => "down",
            Direction::DownRight => "down_right",
        }
    }
}

// ── Field & bounds ───────────────────────────────────────────────────────────

/// The playable area.  Origin is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Field { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        check_bound(rect, self) == (true, true)
    }
}

/// Returns `(horizontal, vertical)` in-bounds flags for `rect`.
///
/// Both intervals are closed: an edge that touches the field border is still
/// inside.
pub fn check_bound(rect: &Rect, field: &Field) -> (bool, bool) {
    let horizontal = rect.left() >= 0 && rect.right() <= field.width;
    let vertical = rect.top() >= 0 && rect.bottom() <= field.height;
    (horizontal, vertical)
}
