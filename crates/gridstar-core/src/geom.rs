//! Geometry primitives: [`Point`] and [`Direction`].
//!
//! Grid positions use screen coordinates: `x` is the column and grows to the
//! east, `y` is the row and grows to the south. North is therefore `y - 1`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right (column), Y grows down (row).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// Row index (same as `y`).
    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    /// Column index (same as `x`).
    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// The neighbour in direction `d`.
    #[inline]
    pub fn step(self, d: Direction) -> Self {
        self + d.offset()
    }

    /// All eight neighbours, clockwise starting at north.
    ///
    /// Index `i` of the result is the neighbour in [`Direction::ALL`]`[i]`.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Whether `other` is one king move away (including diagonals).
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        let d = other - self;
        d != Point::ZERO && d.x.abs() <= 1 && d.y.abs() <= 1
    }
}

// --- trait impls for Point ---

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight neighbour slots of a cell, numbered clockwise from north.
///
/// The discriminant is the slot index used by [`Cell::neighbors`](crate::Cell::neighbors).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Slot index in `0..8`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a slot index. Indices wrap modulo 8.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % 8]
    }

    /// The direction pointing back: slot `(i + 4) % 8`.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// Unit offset of this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::NorthEast => Point::new(1, -1),
            Self::East => Point::new(1, 0),
            Self::SouthEast => Point::new(1, 1),
            Self::South => Point::new(0, 1),
            Self::SouthWest => Point::new(-1, 1),
            Self::West => Point::new(-1, 0),
            Self::NorthWest => Point::new(-1, -1),
        }
    }
}
