//! Held / just-pressed tracking for terminal key events.
//!
//! Held state is kept per physical key, so two keys bound to the same action
//! release independently. Many terminals never emit key release events; for
//! those, a held key is considered released once no press or repeat event
//! arrived for `release_timeout_ms`.
//!
//! A press of a held-trigger action (movement, soft drop) while one of its
//! keys is already down is terminal auto-repeat, not a new edge. Discrete
//! actions (rotate, lock) get an edge on every press.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::core::{trigger_of, ActionInput, Trigger};
use crate::map::map_key;
use crate::types::GameAction;

/// Default time without events before a held key counts as released.
pub const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    action: GameAction,
    since_event_ms: u32,
}

/// Key state fed from terminal events and polled by the session.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: Vec<HeldKey>,
    pressed: [bool; GameAction::ALL.len()],
    auto_release: bool,
    release_timeout_ms: u32,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: Vec::with_capacity(8),
            pressed: [false; GameAction::ALL.len()],
            auto_release: true,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Turn the release timeout on or off.
    ///
    /// Disable it when the terminal reports key releases.
    pub fn with_auto_release(mut self, auto_release: bool) -> Self {
        self.auto_release = auto_release;
        self
    }

    /// Feed one key event. Returns the mapped action, if any.
    pub fn handle_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = map_key(key)?;
        let code = fold_case(key.code);
        match key.kind {
            KeyEventKind::Press => self.key_down(code, action),
            KeyEventKind::Repeat => self.touch(code, action),
            KeyEventKind::Release => self.held.retain(|k| k.code != code),
        }
        Some(action)
    }

    fn key_down(&mut self, code: KeyCode, action: GameAction) {
        let auto_repeat = trigger_of(action) == Trigger::Held && self.is_held(action);
        if !auto_repeat {
            self.pressed[action.index()] = true;
        }
        self.touch(code, action);
    }

    fn touch(&mut self, code: KeyCode, action: GameAction) {
        match self.held.iter_mut().find(|k| k.code == code) {
            Some(key) => {
                key.action = action;
                key.since_event_ms = 0;
            }
            None => self.held.push(HeldKey {
                code,
                action,
                since_event_ms: 0,
            }),
        }
    }

    /// Let `elapsed_ms` pass, auto-releasing keys that went quiet.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.auto_release {
            return;
        }
        let timeout = self.release_timeout_ms;
        self.held.retain_mut(|key| {
            key.since_event_ms = key.since_event_ms.saturating_add(elapsed_ms);
            key.since_event_ms <= timeout
        });
    }

    /// Forget this frame's press edges. Call after the session ticked.
    pub fn end_frame(&mut self) {
        self.pressed = [false; GameAction::ALL.len()];
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionInput for KeyTracker {
    fn is_held(&self, action: GameAction) -> bool {
        self.held.iter().any(|k| k.action == action)
    }

    fn was_pressed(&self, action: GameAction) -> bool {
        self.pressed[action.index()]
    }
}

/// Shifted letters release as their lowercase key on some terminals.
fn fold_case(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
