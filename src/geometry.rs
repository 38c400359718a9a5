use itertools::iproduct;
use std::fmt;

/// A board coordinate. The first component picks the row, the second the column.
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn distance(&self, other: &Point) -> usize {
        //l-inf norm seems most appropriate for minesweeper
        let dx = (self.0 as i64 - other.0 as i64).abs();
        let dy = (self.1 as i64 - other.1 as i64).abs();
        dx.max(dy) as usize
    }

    pub fn fits(&self, size: usize) -> bool {
        self.0 < size && self.1 < size
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Points adjacent to `point` on a `size` x `size` board, in row-offset-major order.
///
/// `point` itself is assumed to be on the board.
pub fn neighbor_points(point: &Point, size: usize) -> Vec<Point> {
    iproduct!(-1i64..=1, -1i64..=1)
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .map(|(dx, dy)| (point.0 as i64 + dx, point.1 as i64 + dy))
        .filter(|&(x, y)| x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size)
        .map(|(x, y)| Point(x as usize, y as usize))
        .collect()
}

/// Every point of a `size` x `size` board, row by row.
pub fn points(size: usize) -> impl Iterator<Item = Point> {
    iproduct!(0..size, 0..size).map(|(x, y)| Point(x, y))
}

#[cfg(test)]
use proptest::prelude::*;
