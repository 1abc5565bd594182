//! Terminal input: event → intent mapping and per-tick coalescing.

use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::entities::Intent;
use crate::simulation::{InputSource, Phase};

// ── Coalescing ────────────────────────────────────────────────────────────────

/// All intents seen during one tick, with duplicates collapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentBatch {
    pub jump: bool,
    pub quit: bool,
}

impl IntentBatch {
    pub fn jump() -> Self {
        Self { jump: true, quit: false }
    }

    pub fn quit() -> Self {
        Self { jump: false, quit: true }
    }
}

impl FromIterator<Intent> for IntentBatch {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut batch, intent| {
            match intent {
                Intent::Jump => batch.jump = true,
                Intent::Quit | Intent::Cancel => batch.quit = true,
                Intent::StartGesture | Intent::AcknowledgeGesture => {}
            }
            batch
        })
    }
}

// ── Mapping ───────────────────────────────────────────────────────────────────

/// Translates raw terminal events into intents for the current phase.
///
/// `release_events` tells whether the terminal reports key releases
/// (keyboard-enhancement capable terminals).  Without them a key press
/// acknowledges the game-over screen instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputMapper {
    pub release_events: bool,
}

impl InputMapper {
    pub fn new(release_events: bool) -> Self {
        Self { release_events }
    }

    pub fn intent_for(&self, event: &Event, phase: Phase) -> Option<Intent> {
        match event {
            Event::Key(key) => self.key_intent(key, phase),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                ..
            }) => Some(match phase {
                Phase::AwaitingStart => Intent::StartGesture,
                Phase::Playing => Intent::Jump,
                Phase::GameOver => Intent::AcknowledgeGesture,
            }),
            _ => None,
        }
    }

    fn key_intent(&self, key: &KeyEvent, phase: Phase) -> Option<Intent> {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = *key;

        if kind == KeyEventKind::Press {
            match code {
                KeyCode::Esc => return Some(Intent::Cancel),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Intent::Quit);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Intent::Quit),
                _ => {}
            }
        }

        match phase {
            Phase::AwaitingStart if kind == KeyEventKind::Press && code == KeyCode::Char(' ') => {
                Some(Intent::StartGesture)
            }
            Phase::Playing
                if kind == KeyEventKind::Press
                    && matches!(code, KeyCode::Char(' ') | KeyCode::Up) =>
            {
                Some(Intent::Jump)
            }
            Phase::GameOver => {
                let acknowledges = match kind {
                    KeyEventKind::Release => true,
                    KeyEventKind::Press => !self.release_events,
                    KeyEventKind::Repeat => false,
                };
                acknowledges.then_some(Intent::AcknowledgeGesture)
            }
            _ => None,
        }
    }
}

// ── Terminal input source ─────────────────────────────────────────────────────

/// Dedicate a thread exclusively to blocking event reads, forwarding them
/// through a channel so the game loop never blocks on terminal I/O.
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                tracing::error!(%err, "terminal event read failed");
                break;
            }
        }
    });
    rx
}

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    mapper: InputMapper,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, mapper: InputMapper) -> Self {
        Self { rx, mapper }
    }
}

impl InputSource for TerminalInput {
    fn wait(&mut self, phase: Phase) -> Intent {
        loop {
            match self.rx.recv() {
                Ok(ev) => {
                    if let Some(intent) = self.mapper.intent_for(&ev, phase) {
                        return intent;
                    }
                }
                // Reader thread is gone; nothing can ever arrive again.
                Err(_) => return Intent::Quit,
            }
        }
    }

    fn drain(&mut self, phase: Phase) -> IntentBatch {
        let mapper = self.mapper;
        std::iter::from_fn(|| self.rx.try_recv().ok())
            .filter_map(|ev| mapper.intent_for(&ev, phase))
            .collect()
    }

    fn discard_pending(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}
