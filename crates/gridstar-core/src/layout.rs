//! Grids built from text.
//!
//! A layout is a square block of characters, one per cell, rows separated
//! by `'\n'` or `"\r\n"`:
//!
//! | Char | Cell |
//! |---|---|
//! | `.` | Empty |
//! | `#` | Barrier |
//! | `S` | Start |
//! | `E` | End |
//!
//! Leading/trailing whitespace is trimmed from the whole string but not from
//! individual lines.

use crate::cell::CellState;
use crate::error::LayoutError;
use crate::event::CellEvent;
use crate::geom::Point;
use crate::grid::Grid;

impl Grid {
    /// Parse a text layout into a grid.
    ///
    /// Configuration events are recorded exactly as if the barriers and
    /// endpoints had been placed one by one in row-major order.
    pub fn from_layout(s: &str) -> Result<Self, LayoutError> {
        let normalized = s.trim().replace("\r\n", "\n");
        let s = normalized.as_str();
        let mut marks: Vec<(Point, CellState)> = Vec::new();
        let mut start: Option<Point> = None;
        let mut end: Option<Point> = None;
        let mut x: i32 = 0;
        let mut y: i32 = 0;
        let mut w: i32 = -1;

        for ch in s.chars() {
            if ch == '\n' {
                if w >= 0 && x != w {
                    return Err(LayoutError::InconsistentSize(s.to_string()));
                }
                w = x;
                x = 0;
                y += 1;
                continue;
            }
            let pos = Point::new(x, y);
            let state = match ch {
                '.' => CellState::Empty,
                '#' => CellState::Barrier,
                'S' | 'E' => {
                    let slot = if ch == 'S' { &mut start } else { &mut end };
                    if slot.is_some() {
                        return Err(LayoutError::DuplicateEndpoint { ch, pos });
                    }
                    *slot = Some(pos);
                    if ch == 'S' { CellState::Start } else { CellState::End }
                }
                _ => return Err(LayoutError::InvalidRune { ch, pos }),
            };
            if state != CellState::Empty {
                marks.push((pos, state));
            }
            x += 1;
        }
        if w >= 0 && x != w {
            return Err(LayoutError::InconsistentSize(s.to_string()));
        }
        let (width, height) = if s.is_empty() { (0, 0) } else { (x, y + 1) };
        if width != height {
            return Err(LayoutError::NotSquare { width, height });
        }

        let mut grid = Grid::new(width);
        for (pos, state) in marks {
            let placed = match state {
                CellState::Barrier => grid.set_barrier(pos),
                CellState::Start => grid.set_start(pos),
                _ => grid.set_end(pos),
            };
            // Positions come from the layout itself and endpoints are unique.
            debug_assert!(placed.is_ok(), "layout placement failed: {placed:?}");
        }
        Ok(grid)
    }
}

/// Apply an event stream to a blank `dimension × dimension` picture.
///
/// Returns the same text form as `Grid`'s `Display`, so a consumer of the
/// event stream can check it against the grid it was told about.
pub fn replay(dimension: i32, events: impl IntoIterator<Item = CellEvent>) -> String {
    let mut states = vec![CellState::Empty; (dimension.max(0) * dimension.max(0)) as usize];
    for e in events {
        if e.pos.x >= 0 && e.pos.y >= 0 && e.pos.x < dimension && e.pos.y < dimension {
            states[(e.pos.y * dimension + e.pos.x) as usize] = e.state;
        }
    }
    states
        .chunks(dimension.max(1) as usize)
        .map(|row| row.iter().map(|s| s.glyph()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S..#
.#.#
.#..
...E";

    #[test]
    fn parse_round_trips_through_display() {
        let g = Grid::from_layout(ROOM).unwrap();
        assert_eq!(g.dimension(), 4);
        assert_eq!(g.to_string(), ROOM);
        assert_eq!(g.start(), g.id(Point::new(0, 0)));
        assert_eq!(g.end(), g.id(Point::new(3, 3)));
        assert!(g.at(Point::new(1, 2)).unwrap().is_barrier());
    }

    #[test]
    fn events_replay_to_same_picture() {
        let mut g = Grid::from_layout(ROOM).unwrap();
        let events: Vec<_> = g.drain_events().collect();
        assert_eq!(events.len(), 6);
        assert_eq!(replay(4, events), ROOM);
    }

    #[test]
    fn crlf_line_endings() {
        let g = Grid::from_layout(&ROOM.replace('\n', "\r\n")).unwrap();
        assert_eq!(g.to_string(), ROOM);
    }

    #[test]
    fn empty_layout() {
        let g = Grid::from_layout("  \n ").unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn inconsistent_size_error() {
        assert!(matches!(
            Grid::from_layout("..\n..."),
            Err(LayoutError::InconsistentSize(_))
        ));
    }

    #[test]
    fn not_square_error() {
        assert_eq!(
            Grid::from_layout("...\n...").unwrap_err(),
            LayoutError::NotSquare { width: 3, height: 2 }
        );
    }

    #[test]
    fn invalid_rune_error() {
        assert_eq!(
            Grid::from_layout("..\n.x").unwrap_err(),
            LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn duplicate_start_error() {
        assert_eq!(
            Grid::from_layout("S.\n.S").unwrap_err(),
            LayoutError::DuplicateEndpoint {
                ch: 'S',
                pos: Point::new(1, 1)
            }
        );
    }
}
