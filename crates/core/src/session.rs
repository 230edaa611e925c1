//! Game session - owns the grid and the falling piece and resolves commands
//!
//! Every transform (move left/right/down/up, rotate) goes through the same
//! path: build the candidate piece, ask the grid whether it collides, keep it
//! if not. Rejected transforms are silent no-ops.
//!
//! Time is counted in frame ticks. [`GameSession::tick`] is called once per
//! frame with the number of ticks that passed and an [`ActionInput`] to poll.

use log::{debug, trace};

use crate::grid::{Grid, GridError};
use crate::piece::Tetromino;
use crate::rng::{SpawnPolicy, Spawner};
use crate::timer::TickCounter;
use crate::types::*;

/// Polling interface of the input collaborator
pub trait ActionInput {
    /// The action's key is currently down
    fn is_held(&self, action: GameAction) -> bool;
    /// The action's key went down this frame
    fn was_pressed(&self, action: GameAction) -> bool;
}

/// When a binding fires during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// On the press edge, then every input-repeat period while held
    Held,
    /// Once per discrete press
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBinding {
    pub action: GameAction,
    pub trigger: Trigger,
}

/// Bindings in the order they are resolved each tick
pub const CONTROLS: [ControlBinding; 6] = [
    ControlBinding {
        action: GameAction::MoveLeft,
        trigger: Trigger::Held,
    },
    ControlBinding {
        action: GameAction::MoveRight,
        trigger: Trigger::Held,
    },
    ControlBinding {
        action: GameAction::MoveUp,
        trigger: Trigger::Held,
    },
    ControlBinding {
        action: GameAction::SoftDrop,
        trigger: Trigger::Held,
    },
    ControlBinding {
        action: GameAction::RotateCw,
        trigger: Trigger::Pressed,
    },
    ControlBinding {
        action: GameAction::Lock,
        trigger: Trigger::Pressed,
    },
];

/// How `action` is bound in [`CONTROLS`]
pub fn trigger_of(action: GameAction) -> Trigger {
    CONTROLS
        .iter()
        .find(|binding| binding.action == action)
        .map_or(Trigger::Pressed, |binding| binding.trigger)
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub width: u16,
    pub height: u16,
    pub gravity_ticks: u32,
    pub input_repeat_ticks: u32,
    pub spawn: SpawnPolicy,
    /// Lock the piece when a gravity move is rejected
    pub lock_on_landing: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            gravity_ticks: GRAVITY_TICKS,
            input_repeat_ticks: INPUT_REPEAT_TICKS,
            spawn: SpawnPolicy::default(),
            lock_on_landing: false,
        }
    }
}

/// A running game: settled grid, falling piece, and the two tick counters
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    piece: Tetromino,
    spawner: Spawner,
    gravity: TickCounter,
    input_repeat: TickCounter,
    lock_on_landing: bool,
    pieces_locked: u32,
}

impl GameSession {
    /// Create a session with an empty grid and the first piece at spawn.
    pub fn new(settings: SessionSettings) -> Result<Self, GridError> {
        let grid = Grid::new(settings.width, settings.height)?;
        let mut spawner = Spawner::new(settings.spawn);
        let piece = Tetromino::new(spawner.next_kind());
        debug!(
            "session started on {}x{} grid, first piece {:?}",
            settings.width, settings.height, piece.kind
        );

        Ok(Self {
            grid,
            piece,
            spawner,
            gravity: TickCounter::new(settings.gravity_ticks),
            input_repeat: TickCounter::new(settings.input_repeat_ticks),
            lock_on_landing: settings.lock_on_landing,
            pieces_locked: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> Tetromino {
        self.piece
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn gravity(&self) -> &TickCounter {
        &self.gravity
    }

    /// Replace the falling piece without a collision check.
    pub fn set_piece(&mut self, piece: Tetromino) {
        self.piece = piece;
    }

    /// Commit `candidate` as the falling piece unless it collides.
    pub fn try_transform(&mut self, candidate: Tetromino) -> bool {
        if self.grid.would_collide(&candidate) {
            trace!(
                "rejected {:?} {:?} at ({}, {})",
                candidate.kind,
                candidate.rotation,
                candidate.x,
                candidate.y
            );
            return false;
        }
        self.piece = candidate;
        true
    }

    /// Try to move the falling piece by (dx, dy)
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        self.try_transform(self.piece.shifted(dx, dy))
    }

    /// Try to rotate the falling piece one step clockwise, without kicks
    pub fn try_rotate(&mut self) -> bool {
        self.try_transform(self.piece.rotated_cw())
    }

    /// Merge the falling piece into the grid and spawn the next one.
    pub fn lock_piece(&mut self) {
        self.grid.lock(&self.piece);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(
            "locked {:?} at ({}, {}), {} cells settled",
            self.piece.kind,
            self.piece.x,
            self.piece.y,
            self.grid.occupied_count()
        );
        self.spawn_piece();
    }

    fn spawn_piece(&mut self) {
        self.piece = Tetromino::new(self.spawner.next_kind());
        debug!("spawned {:?}", self.piece.kind);
    }

    /// Apply a single action; returns whether the session changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::MoveUp => self.try_move(0, -1),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::Lock => {
                self.lock_piece();
                true
            }
        }
    }

    /// Advance the session by `elapsed_ticks` frame ticks.
    ///
    /// Resolves the control bindings in order, then gravity. Returns whether
    /// the piece or the grid changed.
    pub fn tick(&mut self, input: &impl ActionInput, elapsed_ticks: u32) -> bool {
        let mut changed = false;
        let repeat_due = self.input_repeat.advance(elapsed_ticks);

        for binding in CONTROLS {
            let fire = match binding.trigger {
                Trigger::Held => {
                    input.was_pressed(binding.action)
                        || (repeat_due && input.is_held(binding.action))
                }
                Trigger::Pressed => input.was_pressed(binding.action),
            };
            if fire {
                changed |= self.apply_action(binding.action);
            }
        }

        if self.gravity.advance(elapsed_ticks) {
            if self.try_move(0, 1) {
                changed = true;
            } else if self.lock_on_landing {
                self.lock_piece();
                changed = true;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Input with nothing held and nothing pressed
    struct Idle;

    impl ActionInput for Idle {
        fn is_held(&self, _action: GameAction) -> bool {
            false
        }
        fn was_pressed(&self, _action: GameAction) -> bool {
            false
        }
    }

    fn fixed(kind: PieceKind) -> GameSession {
        GameSession::new(SessionSettings {
            spawn: SpawnPolicy::Fixed(kind),
            ..SessionSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_every_action_has_one_binding() {
        for action in GameAction::ALL {
            assert_eq!(CONTROLS.iter().filter(|b| b.action == action).count(), 1);
        }
        assert_eq!(trigger_of(GameAction::SoftDrop), Trigger::Held);
        assert_eq!(trigger_of(GameAction::RotateCw), Trigger::Pressed);
        assert_eq!(trigger_of(GameAction::Lock), Trigger::Pressed);
    }

    #[test]
    fn test_new_session() {
        let session = fixed(PieceKind::T);
        assert_eq!(session.grid().width(), 10);
        assert_eq!(session.grid().height(), 20);
        assert_eq!(session.grid().occupied_count(), 0);
        assert_eq!(session.piece(), Tetromino::new(PieceKind::T));
        assert_eq!(session.pieces_locked(), 0);
    }

    #[test]
    fn test_new_session_rejects_empty_grid() {
        let err = GameSession::new(SessionSettings {
            width: 0,
            ..SessionSettings::default()
        })
        .unwrap_err();
        assert!(matches!(err, GridError::EmptyDimensions { .. }));
    }

    #[test]
    fn test_gravity_fires_on_threshold() {
        let mut session = fixed(PieceKind::O);
        for _ in 0..GRAVITY_TICKS - 1 {
            assert!(!session.tick(&Idle, 1));
        }
        assert_eq!(session.piece().y, 0);
        assert!(session.tick(&Idle, 1));
        assert_eq!(session.piece().y, 1);
    }

    #[test]
    fn test_lock_action_spawns_new_piece() {
        let mut session = fixed(PieceKind::O);
        session.try_move(0, 5);
        assert!(session.apply_action(GameAction::Lock));

        assert_eq!(session.pieces_locked(), 1);
        assert_eq!(session.grid().occupied_count(), 4);
        assert_eq!(session.piece(), Tetromino::new(PieceKind::O));
    }

    #[test]
    fn test_rejected_gravity_without_auto_lock_keeps_piece() {
        let mut session = fixed(PieceKind::O);
        while session.try_move(0, 1) {}
        let landed = session.piece();

        assert!(!session.tick(&Idle, GRAVITY_TICKS));
        assert_eq!(session.piece(), landed);
        assert_eq!(session.pieces_locked(), 0);
    }

    #[test]
    fn test_lock_on_landing() {
        let mut session = GameSession::new(SessionSettings {
            spawn: SpawnPolicy::Fixed(PieceKind::O),
            lock_on_landing: true,
            ..SessionSettings::default()
        })
        .unwrap();
        while session.try_move(0, 1) {}

        assert!(session.tick(&Idle, GRAVITY_TICKS));
        assert_eq!(session.pieces_locked(), 1);
        assert!(session.grid().is_occupied(4, 19));
    }
}
