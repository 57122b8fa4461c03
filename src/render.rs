/// Presentation seam.
///
/// The simulation never owns pixels.  Entities describe what to draw with a
/// logical [`Sprite`] key and a destination [`Rect`]; a [`Canvas`]
/// implementation (the terminal front end, or [`RecordingCanvas`] in tests)
/// decides what that key looks like.

use std::io;

use crate::error::ConfigError;
use crate::geometry::{Direction, Rect};

// ── Colours & text ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Nominal point size; canvases that cannot scale text may ignore it.
    pub size: u16,
    pub colour: Rgb,
}

/// Which corner of the text block `Label::position` pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    BottomLeft,
}

/// A render-ready piece of text: the string plus everything the text service
/// needs to turn it into a drawable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
    pub position: (i32, i32),
    pub anchor: Anchor,
}

// ── Sprite keys ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    /// The actor's normal image for one of the eight facings.
    Actor(Direction),
    /// Shown on the frame a hazard is destroyed.
    ActorVictory,
    /// Shown once, on the game-over frame.
    ActorDefeated,
    Projectile(Direction),
    Hazard { colour: Rgb, radius: i32 },
    /// Explosion animation; `phase` is 0 or 1.
    Explosion { phase: usize },
}

// ── Canvas ───────────────────────────────────────────────────────────────────

/// Rendering collaborator.  Draw calls compose a frame; `present` publishes it.
pub trait Canvas {
    fn draw(&mut self, sprite: Sprite, dest: Rect) -> io::Result<()>;

    fn draw_label(&mut self, label: &Label) -> io::Result<()>;

    fn present(&mut self) -> io::Result<()>;
}

// ── Orientation table ────────────────────────────────────────────────────────

/// One image per facing direction, guaranteed complete.
///
/// Built once at startup; a missing direction is a configuration error rather
/// than something papered over at draw time.
#[derive(Clone, Debug)]
pub struct OrientationTable<I> {
    images: Vec<I>,
}

impl<I> OrientationTable<I> {
    /// Collect `(direction, image)` pairs.  Later duplicates win.
    pub fn from_entries(
        what: &'static str,
        entries: impl IntoIterator<Item = (Direction, I)>,
    ) -> Result<Self, ConfigError> {
        let mut slots: [Option<I>; 8] = Default::default();
        for (dir, image) in entries {
            slots[dir.index()] = Some(image);
        }

        let mut images = Vec::with_capacity(Direction::ALL.len());
        for (dir, slot) in Direction::ALL.into_iter().zip(slots) {
            match slot {
                Some(image) => images.push(image),
                None => {
                    return Err(ConfigError::MissingOrientation {
                        table: what,
                        direction: dir,
                    })
                }
            }
        }
        Ok(OrientationTable { images })
    }

    pub fn get(&self, dir: Direction) -> &I {
        &self.images[dir.index()]
    }
}

// ── Headless canvas ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Sprite(Sprite, Rect),
    Label(Label),
    Present,
}

/// Canvas that keeps every call in order instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = (&Sprite, &Rect)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Sprite(s, r) => Some((s, r)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Label(l) => Some(l),
            _ => None,
        })
    }

    pub fn present_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Present).count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, sprite: Sprite, dest: Rect) -> io::Result<()> {
        self.calls.push(DrawCall::Sprite(sprite, dest));
        Ok(())
    }

    fn draw_label(&mut self, label: &Label) -> io::Result<()> {
        self.calls.push(DrawCall::Label(label.clone()));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}
