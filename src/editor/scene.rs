//! Drawing contents: segments, paths and named shapes

use std::collections::BTreeMap;

use crate::coords::{Point, Rgba};

/// Name of the square that `:here` moves
pub const SQUARE: &str = "top";

/// Side length of a named square in canvas units
pub const SQUARE_SIZE: i32 = 40;

/// A straight line drawn between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
}

/// A polyline built one cursor position at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
    color: Rgba,
}

impl Path {
    pub fn new(start: Point, color: Rgba) -> Self {
        Self {
            points: vec![start],
            color,
        }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    segments: Vec<Segment>,
    paths: Vec<Path>,
    /// Index into `paths` of the path `a` appends to
    current_path: Option<usize>,
    /// Named squares, keyed by name, positioned by their bottom-left corner
    squares: BTreeMap<String, Point>,
}

impl Default for Scene {
    fn default() -> Self {
        let mut squares = BTreeMap::new();
        squares.insert(SQUARE.to_string(), Point::ORIGIN);
        Self {
            segments: Vec::new(),
            paths: Vec::new(),
            current_path: None,
            squares,
        }
    }
}

impl Scene {
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Begin a new path at `start`; later appends go to it
    pub fn start_path(&mut self, start: Point, color: Rgba) {
        self.paths.push(Path::new(start, color));
        self.current_path = Some(self.paths.len() - 1);
    }

    /// Append to the current path. Returns false when no path was started.
    pub fn append_path(&mut self, p: Point) -> bool {
        match self.current_path.and_then(|i| self.paths.get_mut(i)) {
            Some(path) => {
                path.push(p);
                true
            }
            None => false,
        }
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.and_then(|i| self.paths.get(i))
    }

    /// Move a named square. Returns false when no square has that name.
    pub fn move_square(&mut self, name: &str, to: Point) -> bool {
        match self.squares.get_mut(name) {
            Some(pos) => {
                *pos = to;
                true
            }
            None => false,
        }
    }

    pub fn square(&self, name: &str) -> Option<Point> {
        self.squares.get(name).copied()
    }

    pub fn squares(&self) -> impl Iterator<Item = (&str, Point)> {
        self.squares.iter().map(|(name, p)| (name.as_str(), *p))
    }
}
