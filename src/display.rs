/// Terminal front end for the `Canvas` seam.
///
/// Field coordinates (pixels) are scaled onto the terminal grid; every sprite
/// is drawn as a single glyph at the cell under its rect's center.  The glyph
/// for each sprite key comes from a [`Skin`] resolved once at startup.

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use blast_field::error::ConfigError;
use blast_field::geometry::{Direction, Field, Rect};
use blast_field::render::{Anchor, Canvas, Label, OrientationTable, Rgb, Sprite};

// ── Glyphs ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    pub text: &'static str,
    pub colour: Color,
}

const fn glyph(text: &'static str, colour: Color) -> Glyph {
    Glyph { text, colour }
}

/// Built-in glyph catalog, keyed by logical resource name.
pub fn builtin_catalog() -> HashMap<String, Glyph> {
    let actor = [
        (Direction::Right, "→"),
        (Direction::UpRight, "↗"),
        (Direction::Up, "↑"),
        (Direction::UpLeft, "↖"),
        (Direction::Left, "←"),
        (Direction::DownLeft, "↙"),
        (Direction::Down, "↓"),
        (Direction::DownRight, "↘"),
    ];
    let beam = [
        (Direction::Right, "─"),
        (Direction::UpRight, "╱"),
        (Direction::Up, "│"),
        (Direction::UpLeft, "╲"),
        (Direction::Left, "─"),
        (Direction::DownLeft, "╱"),
        (Direction::Down, "│"),
        (Direction::DownRight, "╲"),
    ];

    let mut catalog = HashMap::new();
    for (dir, text) in actor {
        catalog.insert(format!("actor/{}", dir.name()), glyph(text, Color::White));
    }
    for (dir, text) in beam {
        catalog.insert(format!("beam/{}", dir.name()), glyph(text, Color::Cyan));
    }
    catalog.insert("actor/victory".into(), glyph("☺", Color::Yellow));
    catalog.insert("actor/defeated".into(), glyph("✖", Color::Red));
    catalog.insert("hazard".into(), glyph("●", Color::Red));
    catalog.insert("explosion/0".into(), glyph("✺", Color::Yellow));
    catalog.insert("explosion/1".into(), glyph("✹", Color::DarkYellow));
    catalog
}

/// Every glyph the canvas can draw, resolved and checked up front.
#[derive(Clone, Debug)]
pub struct Skin {
    actor: OrientationTable<Glyph>,
    beam: OrientationTable<Glyph>,
    victory: Glyph,
    defeated: Glyph,
    hazard: Glyph,
    explosion: [Glyph; 2],
}

impl Skin {
    pub fn load(catalog: &HashMap<String, Glyph>) -> Result<Skin, ConfigError> {
        let fetch = |name: &str| {
            catalog
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::MissingResource(name.to_string()))
        };

        Ok(Skin {
            actor: OrientationTable::from_entries("actor", oriented(catalog, "actor"))?,
            beam: OrientationTable::from_entries("beam", oriented(catalog, "beam"))?,
            victory: fetch("actor/victory")?,
            defeated: fetch("actor/defeated")?,
            hazard: fetch("hazard")?,
            explosion: [fetch("explosion/0")?, fetch("explosion/1")?],
        })
    }

    fn resolve(&self, sprite: Sprite) -> Option<Glyph> {
        match sprite {
            Sprite::Background => None,
            Sprite::Actor(dir) => Some(*self.actor.get(dir)),
            Sprite::ActorVictory => Some(self.victory),
            Sprite::ActorDefeated => Some(self.defeated),
            Sprite::Projectile(dir) => Some(*self.beam.get(dir)),
            Sprite::Hazard { colour, .. } => Some(Glyph {
                colour: to_color(colour),
                ..self.hazard
            }),
            Sprite::Explosion { phase } => Some(self.explosion[phase % 2]),
        }
    }
}

/// Whatever `prefix/<direction>` entries the catalog has; gaps are left for
/// `OrientationTable` to reject.
fn oriented(catalog: &HashMap<String, Glyph>, prefix: &str) -> Vec<(Direction, Glyph)> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| {
            catalog
                .get(&format!("{prefix}/{}", dir.name()))
                .map(|g| (dir, *g))
        })
        .collect()
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas<W: Write> {
    out: W,
    skin: Skin,
    field: Field,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, skin: Skin, field: Field, (cols, rows): (u16, u16)) -> Self {
        TerminalCanvas {
            out,
            skin,
            field,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Terminal cell under field point `(x, y)`, clamped to the screen.
    fn cell(&self, x: i32, y: i32) -> (u16, u16) {
        let scale = |v: i32, extent: i32, cells: u16| -> u16 {
            let v = i64::from(v.clamp(0, extent));
            let c = v * i64::from(cells) / i64::from(extent.max(1));
            c.min(i64::from(cells) - 1) as u16
        };
        (
            scale(x, self.field.width, self.cols),
            scale(y, self.field.height, self.rows),
        )
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn draw(&mut self, sprite: Sprite, dest: Rect) -> io::Result<()> {
        let Some(g) = self.skin.resolve(sprite) else {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            return Ok(());
        };
        let (cx, cy) = dest.center();
        let (col, row) = self.cell(cx, cy);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(g.colour))?;
        self.out.queue(Print(g.text))?;
        Ok(())
    }

    fn draw_label(&mut self, label: &Label) -> io::Result<()> {
        let (x, y) = label.position;
        let (col, mut row) = self.cell(x, y);
        if label.anchor == Anchor::BottomLeft {
            row = row.saturating_sub(1);
        }
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out
            .queue(style::SetForegroundColor(to_color(label.style.colour)))?;
        self.out.queue(Print(&label.text))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
