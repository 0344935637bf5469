//! Rooms, cells and directions making up a dungeon topology.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Compass direction of a passage. North is toward `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in flag order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index into a room's flag array
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// (dx, dy) step for this direction
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// A grid coordinate. At most one room occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in `dir`, if it lies inside a `width` x `height` grid
    pub fn step(self, dir: Direction, width: usize, height: usize) -> Option<Cell> {
        let (dx, dy) = dir.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Cell { x, y })
    }

    /// In-grid neighbours paired with the direction leading to them
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = (Direction, Cell)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir, width, height).map(|cell| (dir, cell)))
    }

    pub fn is_border(self, width: usize, height: usize) -> bool {
        self.x == 0 || self.y == 0 || self.x + 1 == width || self.y + 1 == height
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identifier of a room within one generated dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub Uuid);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role of a room in the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Entrance,
    Exit,
    Normal,
}

impl RoomKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomKind::Entrance => "Entrance",
            RoomKind::Exit => "Exit",
            RoomKind::Normal => "Normal",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single room of the dungeon grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) cell: Cell,
    pub(crate) kind: RoomKind,
    /// Open passages (north, east, south, west)
    pub(crate) connections: [bool; 4],
    /// Rooms between this one and the main path (0 = on the main path)
    pub(crate) branch_depth: u32,
}

impl Room {
    pub(crate) fn new(id: RoomId, cell: Cell, kind: RoomKind, branch_depth: u32) -> Self {
        Self {
            id,
            cell,
            kind,
            connections: [false; 4],
            branch_depth,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn branch_depth(&self) -> u32 {
        self.branch_depth
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        self.connections[dir.index()]
    }

    pub fn north(&self) -> bool {
        self.is_open(Direction::North)
    }

    pub fn east(&self) -> bool {
        self.is_open(Direction::East)
    }

    pub fn south(&self) -> bool {
        self.is_open(Direction::South)
    }

    pub fn west(&self) -> bool {
        self.is_open(Direction::West)
    }

    /// Directions with an open passage
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&dir| self.is_open(dir))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.iter().filter(|&&c| c).count()
    }

    pub fn is_dead_end(&self) -> bool {
        self.connection_count() == 1
    }
}

/// Content placed into a room by entity placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    Enemy { name: String, level: u32 },
    TreasureChest { gold: u32 },
    MagicalLockPick,
    Generic { name: String },
}

/// Non-topological data collaborators attach after generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomAnnotations {
    pub description: Option<String>,
    pub entities: Vec<Entity>,
}
