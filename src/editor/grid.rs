//! Movement grid
//!
//! Cursor moves snap to a square grid. Every move lands on the grid line at
//! or to the left of / below the unsnapped target, so a cursor that is off
//! the grid snaps onto it with a single left or down move.

use crate::coords::{axis_limit, CanvasSize, Point};

/// Grid spacings, coarsest last
pub const SCALES: [i32; 6] = [1, 5, 10, 20, 40, 80];

/// Index into `SCALES` used when nothing is configured
pub const DEFAULT_SCALE_INDEX: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementGrid {
    size: CanvasSize,
    scale: usize,
    visible: bool,
}

impl Default for MovementGrid {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl MovementGrid {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            scale: DEFAULT_SCALE_INDEX,
            visible: true,
        }
    }

    /// Start at a given scale index (clamped to the table)
    pub fn with_scale_index(mut self, index: usize) -> Self {
        self.scale = index.min(SCALES.len() - 1);
        self.visible = self.scale >= 1;
        self
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn scale_index(&self) -> usize {
        self.scale
    }

    /// Current spacing in canvas units
    pub fn spacing(&self) -> i32 {
        SCALES[self.scale]
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // ========================================================================
    // Scale and visibility
    // ========================================================================

    /// At the finest scale, toggling steps up instead (a 1-unit grid is all
    /// lines). At the next scale it steps back down to hide it.
    pub fn toggle_visibility(&mut self) {
        match self.scale {
            0 => self.scale_up(),
            1 => self.scale_down(),
            _ => self.visible = !self.visible,
        }
    }

    pub fn scale_up(&mut self) {
        self.scale = (self.scale + 1).min(SCALES.len() - 1);
        if self.scale >= 1 {
            self.visible = true;
        }
    }

    pub fn scale_down(&mut self) {
        self.scale = self.scale.saturating_sub(1);
        if self.scale < 1 {
            self.visible = false;
        }
    }

    // ========================================================================
    // Moves
    // ========================================================================

    fn snap(&self, v: i32) -> i32 {
        let s = self.spacing();
        s * v.div_euclid(s)
    }

    /// Snap a point to the grid line at or below/left of it
    pub fn clamp_left_down(&self, p: Point) -> Point {
        Point::new(self.snap(p.x), self.snap(p.y))
    }

    fn step(&self, multiplier: u32) -> i32 {
        let m = i32::try_from(multiplier).unwrap_or(i32::MAX);
        self.spacing().saturating_mul(m)
    }

    /// The back-off used by left/down moves: one unit plus `multiplier - 1`
    /// spacings, so an on-grid point moves exactly `multiplier` spacings
    fn back_step(&self, multiplier: u32) -> i32 {
        let m = i32::try_from(multiplier.max(1) - 1).unwrap_or(i32::MAX);
        self.spacing().saturating_mul(m).saturating_add(1)
    }

    pub fn up(&self, p: Point, multiplier: u32) -> Point {
        self.clamp_left_down(p + Point::new(0, self.step(multiplier)))
    }

    pub fn right(&self, p: Point, multiplier: u32) -> Point {
        self.clamp_left_down(p + Point::new(self.step(multiplier), 0))
    }

    pub fn left(&self, p: Point, multiplier: u32) -> Point {
        self.clamp_left_down(p - Point::new(self.back_step(multiplier), 0))
    }

    pub fn down(&self, p: Point, multiplier: u32) -> Point {
        self.clamp_left_down(p - Point::new(0, self.back_step(multiplier)))
    }

    /// Interior grid line offsets along one axis of length `extent`
    pub fn lines(&self, extent: u32) -> impl Iterator<Item = i32> {
        let spacing = self.spacing();
        let extent = axis_limit(extent);
        (1..=i32::MAX)
            .map_while(move |i| i.checked_mul(spacing))
            .take_while(move |v| *v < extent)
    }
}
