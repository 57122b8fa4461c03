/// crossterm-backed `InputSource`.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each poll reports which movement keys are still
/// "fresh" (within `HOLD_WINDOW` frames), so two arrows can be held for a
/// diagonal while Space fires.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.

use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, TryRecvError};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

use blast_field::input::{HeldKeys, InputEvent, InputSnapshot, InputSource};

/// A key counts as held if it was seen within this many frames.  At 50 FPS
/// this is 140 ms, longer than any OS key-repeat interval.
const HOLD_WINDOW: u64 = 7;

pub struct KeyboardInput {
    rx: mpsc::Receiver<Event>,
    // Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyboardInput {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        KeyboardInput {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }

    fn handle_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        events.push(InputEvent::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(InputEvent::Quit);
                    }
                    KeyCode::Char(' ') => events.push(InputEvent::Fire),
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        self.frame += 1;
        let mut events = Vec::new();

        // Drain all pending input events (non-blocking)
        loop {
            match self.rx.try_recv() {
                Ok(Event::Key(key)) => self.handle_key(key, &mut events),
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("input reader stopped; treating as quit");
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }

        let held = HeldKeys {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        };
        Ok(InputSnapshot { held, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn press_holds_until_release() {
        let (tx, rx) = mpsc::channel();
        let mut input = KeyboardInput::new(rx);
        tx.send(key(KeyCode::Up, KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Char('d'), KeyEventKind::Press)).unwrap();
        let snap = input.poll().unwrap();
        assert!(snap.held.up && snap.held.right);

        tx.send(key(KeyCode::Up, KeyEventKind::Release)).unwrap();
        let snap = input.poll().unwrap();
        assert!(!snap.held.up);
        assert!(snap.held.right);
    }

    #[test]
    fn press_expires_without_repeat() {
        let (tx, rx) = mpsc::channel();
        let mut input = KeyboardInput::new(rx);
        tx.send(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        assert!(input.poll().unwrap().held.left);
        for _ in 0..HOLD_WINDOW {
            input.poll().unwrap();
        }
        assert!(!input.poll().unwrap().held.left);
    }

    #[test]
    fn space_fires_and_q_quits() {
        let (tx, rx) = mpsc::channel();
        let mut input = KeyboardInput::new(rx);
        tx.send(key(KeyCode::Char(' '), KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Char(' '), KeyEventKind::Repeat)).unwrap();
        tx.send(key(KeyCode::Char('q'), KeyEventKind::Press)).unwrap();
        let snap = input.poll().unwrap();
        assert_eq!(snap.events, vec![InputEvent::Fire, InputEvent::Quit]);
    }

    #[test]
    fn dropped_reader_quits() {
        let (tx, rx) = mpsc::channel::<Event>();
        drop(tx);
        let mut input = KeyboardInput::new(rx);
        assert!(input.poll().unwrap().quit_requested());
    }
}
