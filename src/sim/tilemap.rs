//! Tile grid queries
//!
//! The simulation only ever asks the level two questions: is there a solid
//! tile under this point, and which solid shapes are near this position.
//! `TileGrid` is a minimal in-memory grid answering both, used by the
//! headless runner and tests; real levels can implement `TileQuery` on
//! their own storage.

use std::collections::HashSet;

use glam::Vec2;

use super::rect::Rect;
use crate::consts::TILE_SIZE;

/// Read-only collision queries against static level geometry
pub trait TileQuery {
    /// True if a physically solid tile occupies the cell containing `point`
    fn solid_at(&self, point: Vec2) -> bool;

    /// Candidate solid shapes in a fixed neighbourhood of `pos`
    fn shapes_near(&self, pos: Vec2) -> Vec<Rect>;
}

/// Cells checked around a position (3x3 block centred on its cell)
const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Sparse grid of solid tiles
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub tile_size: i32,
    solid: HashSet<(i32, i32)>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(TILE_SIZE)
    }
}

impl TileGrid {
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size,
            solid: HashSet::new(),
        }
    }

    /// Mark the cell at grid coordinates (x, y) as solid
    pub fn set_solid(&mut self, x: i32, y: i32) {
        self.solid.insert((x, y));
    }

    /// Fill a horizontal run of solid cells from `x0` to `x1` inclusive
    pub fn fill_row(&mut self, y: i32, x0: i32, x1: i32) {
        for x in x0..=x1 {
            self.set_solid(x, y);
        }
    }

    /// Fill a vertical run of solid cells from `y0` to `y1` inclusive
    pub fn fill_column(&mut self, x: i32, y0: i32, y1: i32) {
        for y in y0..=y1 {
            self.set_solid(x, y);
        }
    }

    /// Grid cell containing a pixel-space point
    pub fn cell_of(&self, point: Vec2) -> (i32, i32) {
        let size = self.tile_size as f32;
        (
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.solid.contains(&(x, y))
    }
}

impl TileQuery for TileGrid {
    fn solid_at(&self, point: Vec2) -> bool {
        let (x, y) = self.cell_of(point);
        self.is_solid(x, y)
    }

    fn shapes_near(&self, pos: Vec2) -> Vec<Rect> {
        let (cx, cy) = self.cell_of(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .map(|(dx, dy)| (cx + dx, cy + dy))
            .filter(|&(x, y)| self.is_solid(x, y))
            .map(|(x, y)| {
                Rect::new(
                    x * self.tile_size,
                    y * self.tile_size,
                    self.tile_size,
                    self.tile_size,
                )
            })
            .collect()
    }
}
