//! Game state module - owns the board, the active piece and the lookahead piece
//!
//! All mutation goes through validated transitions:
//!
//! - [`GameState::apply_action`] validates a candidate placement and either commits it
//!   (repainting the board) or leaves everything untouched.
//! - [`GameState::gravity_step`] runs one gravity transition: descend if the row below
//!   the footprint is admissible, otherwise lock the piece and promote the lookahead
//!   piece.
//!
//! Full rows are swept after every descend paint (gravity or a manual `MoveDown`) and
//! again on lock, always in a single pass.
//!
//! There is no game-over. When a promoted piece spawns on top of settled cells it is
//! still promoted; [`GameState::spawn_obstructed`] only reports the condition.

use crate::board::{Board, ClearedRows};
use crate::pieces::ActivePiece;
use crate::rng::{PieceSpawner, ShapeSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceColor, PieceId, ShapeKind, PREVIEW_SIZE};
use crate::projection::{cell_at, preview_tiles, CellPaint, PreviewTiles};

/// Gravity controller phase.
///
/// `Locking` and `Spawning` are transient: they are entered and left within a single
/// [`GameState::gravity_step`] call, so observers only ever see `Falling` between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityPhase {
    Falling,
    Locking,
    Spawning,
}

/// Result of a manual move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The candidate was admissible and is now the active piece
    Moved,
    /// The candidate was rejected; nothing changed
    Rejected,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Result of one gravity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game has not been started
    Idle,
    /// The active piece moved one row down; rows completed by the repaint were swept
    Descended { cleared_rows: ClearedRows },
    /// Descent was blocked: the piece locked and the lookahead piece took over
    Locked { cleared_rows: ClearedRows },
}

/// Event emitted when a piece locks (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub piece_id: PieceId,
    pub kind: ShapeKind,
    pub cleared_rows: ClearedRows,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: ActivePiece,
    next: ActivePiece,
    spawner: PieceSpawner<R>,
    phase: GravityPhase,
    started: bool,
    /// Pieces locked since start
    locked_count: u32,
    /// Rows removed since start
    cleared_count: u32,
    last_event: Option<LockEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_spawner(PieceSpawner::seeded(seed))
    }
}

impl<R: ShapeSource> GameState<R> {
    /// Placeholder state: deterministic pieces, empty board, not started.
    pub fn with_spawner(mut spawner: PieceSpawner<R>) -> Self {
        let active = spawner.spawn(false);
        let next = spawner.spawn(false);
        Self {
            board: Board::new(),
            active,
            next,
            spawner,
            phase: GravityPhase::Falling,
            started: false,
            locked_count: 0,
            cleared_count: 0,
            last_event: None,
        }
    }

    /// Start the game: draw random active and lookahead pieces on an empty board.
    ///
    /// Randomization is deferred to here so that a freshly constructed state is the
    /// same everywhere it is built.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.active = self.spawner.spawn(true);
        self.next = self.spawner.spawn(true);
        self.board.clear();
        self.board.paint(&self.active);
        self.phase = GravityPhase::Falling;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> GravityPhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// The lookahead piece (preview only)
    pub fn next_piece(&self) -> ActivePiece {
        self.next
    }

    pub fn locked_count(&self) -> u32 {
        self.locked_count
    }

    pub fn cleared_count(&self) -> u32 {
        self.cleared_count
    }

    pub fn spawner(&self) -> &PieceSpawner<R> {
        &self.spawner
    }

    /// Validate `candidate` and commit it as the active piece.
    fn try_commit(&mut self, candidate: ActivePiece) -> MoveOutcome {
        if !self.board.validate(&candidate) {
            return MoveOutcome::Rejected;
        }
        self.active = candidate;
        self.board.paint(&self.active);
        MoveOutcome::Moved
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> MoveOutcome {
        if !self.started {
            return MoveOutcome::Rejected;
        }
        let candidate = match action.delta() {
            Some((dx, dy)) => self.active.shifted(dx, dy),
            None => self.active.rotated(),
        };
        let outcome = self.try_commit(candidate);
        if outcome.moved() && action == GameAction::MoveDown {
            self.sweep_rows();
        }
        outcome
    }

    /// Whether the active piece may move one row down
    pub fn can_descend(&self) -> bool {
        self.board.validate(&self.active.shifted(0, 1))
    }

    /// Whether the active piece's footprint collides with foreign settled cells or
    /// leaves the board (the stack has reached the spawn area).
    pub fn spawn_obstructed(&self) -> bool {
        self.started && !self.board.validate(&self.active)
    }

    /// Run one gravity transition
    pub fn gravity_step(&mut self) -> TickOutcome {
        if !self.started {
            return TickOutcome::Idle;
        }

        if self.try_commit(self.active.shifted(0, 1)).moved() {
            let cleared_rows = self.sweep_rows();
            return TickOutcome::Descended { cleared_rows };
        }

        self.phase = GravityPhase::Locking;
        let cleared_rows = self.lock_active();
        self.phase = GravityPhase::Spawning;
        self.promote_next();
        self.phase = GravityPhase::Falling;

        TickOutcome::Locked { cleared_rows }
    }

    /// Sweep full rows and count them
    fn sweep_rows(&mut self) -> ClearedRows {
        let cleared_rows = self.board.sweep();
        self.cleared_count = self
            .cleared_count
            .wrapping_add(cleared_rows.len() as u32);
        cleared_rows
    }

    /// The active footprint is already on the board from its last paint; it stays
    /// there as inert history.
    fn lock_active(&mut self) -> ClearedRows {
        let cleared_rows = self.sweep_rows();
        self.locked_count = self.locked_count.wrapping_add(1);
        self.last_event = Some(LockEvent {
            piece_id: self.active.id,
            kind: self.active.kind,
            cleared_rows: cleared_rows.clone(),
        });
        cleared_rows
    }

    /// Lookahead becomes active, and a fresh lookahead is drawn.
    fn promote_next(&mut self) {
        let fresh = self.spawner.spawn(true);
        self.active = std::mem::replace(&mut self.next, fresh);
        self.board.paint(&self.active);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Paint query for the active piece
    pub fn paint_active(&self, col: i16, row: i16) -> CellPaint {
        cell_at(&self.active, col, row)
    }

    /// Preview tiles for the lookahead piece
    pub fn next_piece_tiles(&self) -> PreviewTiles {
        preview_tiles(&self.next)
    }

    /// Color of the lookahead piece's tile at (col, row) of the preview window
    pub fn next_piece_color(&self, col: u8, row: u8) -> Option<PieceColor> {
        if col >= PREVIEW_SIZE || row >= PREVIEW_SIZE {
            return None;
        }
        self.next_piece_tiles()[(row * PREVIEW_SIZE + col) as usize]
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.cells();
        out.active = ActiveSnapshot::from(self.active);
        out.next = ActiveSnapshot::from(self.next);
        out.next_tiles = self.next_piece_tiles();
        out.started = self.started;
        out.locked_count = self.locked_count;
        out.cleared_count = self.cleared_count;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the board (fixtures and benchmarks)
    #[doc(hidden)]
    pub fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
    }

    /// Replace the active piece without validation (fixtures and benchmarks)
    #[doc(hidden)]
    pub fn set_active_for_test(&mut self, piece: ActivePiece) {
        self.active = piece;
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SettledCell, BOARD_HEIGHT};

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn place(state: &mut GameState, piece: ActivePiece) {
        let mut board = state.board().clone();
        board.erase(state.active().id);
        board.paint(&piece);
        state.set_board_for_test(board);
        state.set_active_for_test(piece);
    }

    #[test]
    fn test_new_game_state_is_placeholder() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert_eq!(state.active(), ActivePiece::placeholder());
        assert_eq!(state.next_piece(), ActivePiece::placeholder());
        assert_eq!(state.board().settled_count(), 0);
        assert_eq!(state.phase(), GravityPhase::Falling);
    }

    #[test]
    fn test_not_started_is_inert() {
        let mut state = GameState::new(1);
        assert_eq!(state.apply_action(GameAction::MoveRight), MoveOutcome::Rejected);
        assert_eq!(state.gravity_step(), TickOutcome::Idle);
        assert!(!state.spawn_obstructed());
    }

    #[test]
    fn test_start_randomizes_and_paints() {
        let state = started(12345);

        assert!(state.started());
        assert!(!state.active().id.is_none());
        assert!(!state.next_piece().id.is_none());
        assert_ne!(state.active().id, state.next_piece().id);
        assert_eq!(state.board().count_owned_by(state.active().id), 4);
        assert_eq!(state.board().count_owned_by(state.next_piece().id), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = started(5);
        let active = state.active();
        state.start();
        assert_eq!(state.active(), active);
    }

    #[test]
    fn test_move_repaints_footprint() {
        let mut state = started(3);
        let id = state.active().id;

        assert_eq!(state.apply_action(GameAction::MoveRight), MoveOutcome::Moved);
        assert_eq!(state.active().x, 1);
        assert_eq!(state.board().count_owned_by(id), 4);
        for (x, y) in state.active().cells() {
            assert_eq!(state.board().get(x, y).unwrap().unwrap().piece_id, id);
        }
    }

    #[test]
    fn test_move_left_at_wall_is_rejected() {
        let mut state = started(3);
        let before = state.active();
        let board_before = state.board().clone();

        assert_eq!(state.apply_action(GameAction::MoveLeft), MoveOutcome::Rejected);
        assert_eq!(state.active(), before);
        assert_eq!(*state.board(), board_before);
    }

    #[test]
    fn test_rotate_advances_rotation_index() {
        let mut state = started(3);
        // Park the piece in open space so every variant fits.
        let piece = ActivePiece {
            x: 4,
            y: 5,
            ..state.active()
        };
        place(&mut state, piece);

        assert_eq!(state.apply_action(GameAction::Rotate), MoveOutcome::Moved);
        assert_eq!(state.active().rotation, 1);
    }

    #[test]
    fn test_gravity_descends_until_floor_then_locks() {
        let mut state = started(11);
        let first = state.active();
        let next = state.next_piece();

        let mut steps: i32 = 0;
        loop {
            match state.gravity_step() {
                TickOutcome::Descended { .. } => steps += 1,
                TickOutcome::Locked { cleared_rows } => {
                    assert!(cleared_rows.is_empty());
                    break;
                }
                TickOutcome::Idle => unreachable!(),
            }
            assert!(steps <= BOARD_HEIGHT as i32);
        }

        // Locked footprint rests on the floor and keeps its identity.
        assert_eq!(state.board().count_owned_by(first.id), 4);
        let bottom = first
            .variant()
            .iter()
            .map(|&(_, dy)| dy as i32 + steps)
            .max()
            .unwrap();
        assert_eq!(bottom, BOARD_HEIGHT as i32 - 1);

        // Lookahead promoted, new lookahead drawn.
        assert_eq!(state.active().id, next.id);
        assert_ne!(state.next_piece().id, next.id);
        assert_eq!(state.phase(), GravityPhase::Falling);
        assert_eq!(state.locked_count(), 1);

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.piece_id, first.id);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_manual_down_never_locks() {
        let mut state = started(2);
        while state.apply_action(GameAction::MoveDown).moved() {}
        let resting = state.active();
        assert_eq!(state.apply_action(GameAction::MoveDown), MoveOutcome::Rejected);
        assert_eq!(state.active(), resting);
        assert_eq!(state.locked_count(), 0);
        assert!(!state.can_descend());
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let mut state = started(8);
        let filler = SettledCell {
            color: PieceColor::Green,
            piece_id: PieceId(u64::MAX),
        };
        let mut rows = vec![".........."; 20];
        rows[19] = "####..####";
        rows[18] = "#.........";
        state.set_board_for_test(Board::from_rows(&rows, filler));

        // A square filling the gap in the bottom row.
        let square = ActivePiece {
            x: 4,
            y: 18,
            ..ActivePiece::new(ShapeKind::Square, state.active().id)
        };
        place(&mut state, square);

        match state.gravity_step() {
            TickOutcome::Locked { cleared_rows } => assert_eq!(cleared_rows.as_slice(), &[19]),
            other => panic!("expected lock, got {:?}", other),
        }

        // Row 18 shifted down: its leftover cell plus the square's top half.
        assert!(state.board().is_occupied(0, 19));
        assert!(state.board().is_occupied(4, 19));
        assert!(state.board().is_occupied(5, 19));
        assert_eq!(state.cleared_count(), 1);
    }

    #[test]
    fn test_descend_paint_sweeps_row_filled_under_overhang() {
        let mut state = started(8);
        let filler = SettledCell {
            color: PieceColor::Green,
            piece_id: PieceId(u64::MAX),
        };
        let mut rows = vec![".........."; 20];
        rows[10] = ".#########";
        rows[9] = ".#........";
        state.set_board_for_test(Board::from_rows(&rows, filler));

        // Vertical line in column 0 whose bottom cell drops into the gap at row 10.
        let line = ActivePiece {
            x: 0,
            y: 6,
            ..ActivePiece::new(ShapeKind::Line, state.active().id)
        };
        place(&mut state, line);
        assert!(!state.board().is_row_full(10));

        match state.gravity_step() {
            TickOutcome::Descended { cleared_rows } => {
                assert_eq!(cleared_rows.as_slice(), &[10])
            }
            other => panic!("expected descent, got {:?}", other),
        }
        for y in 0..BOARD_HEIGHT as usize {
            assert!(!state.board().is_row_full(y));
        }
        assert_eq!(state.cleared_count(), 1);
        assert_eq!(state.locked_count(), 0);
        // The overhang cell dropped into the cleared row.
        assert!(state.board().is_occupied(1, 10));
    }

    #[test]
    fn test_manual_down_sweeps_completed_row() {
        let mut state = started(8);
        let filler = SettledCell {
            color: PieceColor::Green,
            piece_id: PieceId(u64::MAX),
        };
        let mut rows = vec![".........."; 20];
        rows[19] = "#########.";
        state.set_board_for_test(Board::from_rows(&rows, filler));

        let line = ActivePiece {
            x: 9,
            y: 15,
            ..ActivePiece::new(ShapeKind::Line, state.active().id)
        };
        place(&mut state, line);

        assert_eq!(state.apply_action(GameAction::MoveDown), MoveOutcome::Moved);
        assert!(!state.board().is_row_full(19));
        assert_eq!(state.cleared_count(), 1);
        assert_eq!(state.locked_count(), 0);
    }

    #[test]
    fn test_spawn_obstructed_reports_without_terminating() {
        let mut state = started(4);
        let filler = SettledCell {
            color: PieceColor::Red,
            piece_id: PieceId(u64::MAX),
        };
        let mut rows = vec!["##########"; 4];
        rows.extend(vec![".........."; 16]);
        state.set_board_for_test(Board::from_rows(&rows, filler));

        assert!(state.spawn_obstructed());
        // Gravity still cycles: lock and promote.
        assert!(matches!(state.gravity_step(), TickOutcome::Locked { .. }));
        assert!(state.started());
    }

    #[test]
    fn test_next_piece_tiles_match_variant() {
        let state = started(6);
        let tiles = state.next_piece_tiles();
        assert_eq!(tiles.iter().filter(|t| t.is_some()).count(), 4);
        for (dx, dy) in state.next_piece().variant() {
            assert_eq!(
                state.next_piece_color(dx as u8, dy as u8),
                Some(state.next_piece().color())
            );
        }
        assert_eq!(state.next_piece_color(4, 0), None);
    }
}
