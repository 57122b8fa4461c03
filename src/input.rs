/// Per-frame input: which movement keys are held, plus discrete events.

use std::collections::VecDeque;
use std::io;

use crate::geometry::{Velocity, STEP};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Sum of the step vectors of every held key.  Opposite keys cancel.
    pub fn displacement(&self) -> Velocity {
        let table = [
            (self.up, Velocity::new(0, -STEP)),
            (self.down, Velocity::new(0, STEP)),
            (self.left, Velocity::new(-STEP, 0)),
            (self.right, Velocity::new(STEP, 0)),
        ];
        table
            .iter()
            .filter(|(held, _)| *held)
            .fold(Velocity::ZERO, |acc, (_, mv)| acc + *mv)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Fire,
    Quit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: HeldKeys,
    /// Events drained since the previous frame, oldest first.
    pub events: Vec<InputEvent>,
}

impl InputSnapshot {
    pub fn held(held: HeldKeys) -> Self {
        InputSnapshot {
            held,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }

    pub fn fire_count(&self) -> usize {
        self.events.iter().filter(|e| **e == InputEvent::Fire).count()
    }
}

/// Input collaborator.  `poll` is called exactly once per frame and must not
/// block.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputSnapshot>;
}

/// Replays a fixed list of snapshots, then reports `Quit` forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        Ok(self
            .frames
            .pop_front()
            .unwrap_or_else(|| InputSnapshot::default().with_event(InputEvent::Quit)))
    }
}
