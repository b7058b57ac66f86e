//! Axis-separated collision resolution against the tile grid
//!
//! Movement is applied one axis at a time. After moving along an axis the
//! body's integer hitbox is tested against nearby solid shapes and snapped
//! flush against any it overlaps, so each axis correction is independent of
//! the other's outcome within the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tilemap::TileQuery;

/// Which sides touched solid geometry during the last advance
///
/// A fresh record is built every tick; nothing carries over between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collisions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    /// Hit a wall on either side
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    /// Landed or bumped a ceiling
    #[inline]
    pub fn vertical(&self) -> bool {
        self.up || self.down
    }
}

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Resolve a move of `delta` along `axis` that has already been added to `pos`
///
/// Returns the corrected coordinate for that axis and sets the matching
/// flags on `collisions`. The coordinate is rewritten from the integer
/// hitbox for every overlapping shape, so a body resting inside a shape
/// with zero movement is still snapped to whole pixels.
pub fn resolve_axis<T: TileQuery + ?Sized>(
    tiles: &T,
    pos: Vec2,
    size: (i32, i32),
    delta: f32,
    axis: Axis,
    collisions: &mut Collisions,
) -> f32 {
    let mut rect = Rect::at(pos, size);
    let mut resolved = match axis {
        Axis::X => pos.x,
        Axis::Y => pos.y,
    };

    for shape in tiles.shapes_near(pos) {
        if !rect.overlaps(&shape) {
            continue;
        }
        match axis {
            Axis::X => {
                if delta > 0.0 {
                    rect.set_right(shape.left());
                    collisions.right = true;
                }
                if delta < 0.0 {
                    rect.set_left(shape.right());
                    collisions.left = true;
                }
                resolved = rect.x as f32;
            }
            Axis::Y => {
                if delta > 0.0 {
                    rect.set_bottom(shape.top());
                    collisions.down = true;
                }
                if delta < 0.0 {
                    rect.set_top(shape.bottom());
                    collisions.up = true;
                }
                resolved = rect.y as f32;
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::TileGrid;

    /// Query that reports the same shape twice
    struct Duplicated(Rect);

    impl TileQuery for Duplicated {
        fn solid_at(&self, _point: Vec2) -> bool {
            true
        }

        fn shapes_near(&self, _pos: Vec2) -> Vec<Rect> {
            vec![self.0, self.0]
        }
    }

    #[test]
    fn test_moving_right_snaps_to_left_edge() {
        let mut grid = TileGrid::default();
        grid.set_solid(2, 1);
        let mut collisions = Collisions::default();
        // Right edge at 26.5 + 8 overlaps the tile starting at x = 32
        let x = resolve_axis(&grid, Vec2::new(26.5, 17.0), (8, 15), 2.0, Axis::X, &mut collisions);
        assert_eq!(x, 24.0);
        assert!(collisions.right);
        assert!(!collisions.left);
    }

    #[test]
    fn test_moving_up_snaps_to_bottom_edge() {
        let mut grid = TileGrid::default();
        grid.set_solid(1, 0);
        let mut collisions = Collisions::default();
        let y = resolve_axis(&grid, Vec2::new(18.0, 14.0), (8, 15), -3.0, Axis::Y, &mut collisions);
        assert_eq!(y, 16.0);
        assert!(collisions.up);
        assert!(!collisions.down);
    }

    #[test]
    fn test_no_overlap_keeps_sub_pixel_position() {
        let grid = TileGrid::default();
        let mut collisions = Collisions::default();
        let x = resolve_axis(&grid, Vec2::new(10.75, 0.0), (8, 15), 0.75, Axis::X, &mut collisions);
        assert_eq!(x, 10.75);
        assert_eq!(collisions, Collisions::default());
    }

    #[test]
    fn test_duplicate_shapes_are_harmless() {
        let query = Duplicated(Rect::new(0, 32, 16, 16));
        let mut collisions = Collisions::default();
        let y = resolve_axis(&query, Vec2::new(4.0, 20.0), (8, 15), 1.0, Axis::Y, &mut collisions);
        assert_eq!(y, 17.0);
        assert!(collisions.down);
    }
}
