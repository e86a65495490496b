//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, async hosts).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Cells**: 200, row-major (`index = row * 10 + column`)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_TICK_MS` | 1200 | Default interval between gravity steps |
//! | `FRAME_MS` | 16 | Terminal poll/render interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_index(3), ShapeKind::Square);
//! assert_eq!(ShapeKind::from_str("triangle"), Some(ShapeKind::Triangle));
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Side length of the local window used for the lookahead preview
pub const PREVIEW_SIZE: u8 = 4;

/// Number of shapes in the catalog
pub const SHAPE_COUNT: usize = 7;

/// Default gravity interval in milliseconds
pub const GRAVITY_TICK_MS: u32 = 1200;

/// Terminal frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// The seven catalog shapes, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    MirroredL,
    L,
    Square,
    S,
    Triangle,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::Line,
        ShapeKind::MirroredL,
        ShapeKind::L,
        ShapeKind::Square,
        ShapeKind::S,
        ShapeKind::Triangle,
        ShapeKind::Z,
    ];

    /// Catalog index of this shape.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shape at a catalog index. Out-of-range indices wrap.
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_index(0), ShapeKind::Line);
    /// assert_eq!(ShapeKind::from_index(7), ShapeKind::Line);
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % SHAPE_COUNT]
    }

    /// Parse a shape from its catalog name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(ShapeKind::Line),
            "mirrored l" | "mirroredl" => Some(ShapeKind::MirroredL),
            "l" => Some(ShapeKind::L),
            "square" => Some(ShapeKind::Square),
            "s" => Some(ShapeKind::S),
            "triangle" => Some(ShapeKind::Triangle),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Catalog name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::MirroredL => "mirrored L",
            ShapeKind::L => "L",
            ShapeKind::Square => "square",
            ShapeKind::S => "s",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Z => "z",
        }
    }
}

/// 24-bit RGB triple.
pub type RgbTriple = (u8, u8, u8);

/// Display color of a shape.
///
/// Each color keeps the stylesheet class it is published under so that
/// non-terminal renderers can map cells without a lookup table of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Violet,
    Red,
}

impl PieceColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "bg-cyan-400",
            PieceColor::Blue => "bg-blue-700",
            PieceColor::Orange => "bg-orange-500",
            PieceColor::Yellow => "bg-yellow-400",
            PieceColor::Green => "bg-green-400",
            PieceColor::Violet => "bg-violet-700",
            PieceColor::Red => "bg-red-800",
        }
    }

    /// Terminal color for this piece color
    pub fn rgb(&self) -> RgbTriple {
        match self {
            PieceColor::Cyan => (34, 211, 238),
            PieceColor::Blue => (29, 78, 216),
            PieceColor::Orange => (249, 115, 22),
            PieceColor::Yellow => (250, 204, 21),
            PieceColor::Green => (74, 222, 128),
            PieceColor::Violet => (109, 40, 217),
            PieceColor::Red => (153, 27, 27),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "cyan",
            PieceColor::Blue => "blue",
            PieceColor::Orange => "orange",
            PieceColor::Yellow => "yellow",
            PieceColor::Green => "green",
            PieceColor::Violet => "violet",
            PieceColor::Red => "red",
        }
    }
}

/// Identity of one piece instantiation.
///
/// Two spawns of the same shape get different ids. `PieceId::NONE` marks the
/// deterministic placeholder piece that exists before the game is started.
///
/// 64 bits so that a session can never exhaust the id space and hand an id that
/// still owns settled cells to a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PieceId(pub u64);

impl PieceId {
    pub const NONE: PieceId = PieceId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// Player actions that move the active piece
///
/// Every action is validated against the board before it is committed; a rejected
/// action leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    MoveDown,
    /// Move piece one cell up (debug)
    MoveUp,
    /// Advance to the next rotation variant
    Rotate,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "moveup" => Some(GameAction::MoveUp),
            "rotate" => Some(GameAction::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string (used in event logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveUp => "moveUp",
            GameAction::Rotate => "rotate",
        }
    }

    /// Translation applied by this action, `None` for rotation
    pub fn delta(&self) -> Option<(i8, i8)> {
        match self {
            GameAction::MoveLeft => Some((-1, 0)),
            GameAction::MoveRight => Some((1, 0)),
            GameAction::MoveDown => Some((0, 1)),
            GameAction::MoveUp => Some((0, -1)),
            GameAction::Rotate => None,
        }
    }
}

/// A settled (painted) board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettledCell {
    pub color: PieceColor,
    pub piece_id: PieceId,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(SettledCell)`: painted by the piece with `piece_id`
pub type Cell = Option<SettledCell>;
