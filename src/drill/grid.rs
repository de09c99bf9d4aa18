//! Field grid geometry
//!
//! The field is a square of `GRID_SIZE` x `GRID_SIZE` cells:
//! - x: 0 = left sideline, GRID_SIZE-1 = right sideline
//! - y: 0 = back of the field, GRID_SIZE-1 = front sideline
//!
//! Nothing here mutates; callers clamp before storing a coordinate.

use glam::IVec2;

use crate::consts::{GRID_CENTER, GRID_SIZE};

/// Centre cell of the field
pub const CENTER: IVec2 = IVec2::new(GRID_CENTER, GRID_CENTER);

/// Check whether a coordinate lies on the field
#[inline]
pub fn in_bounds(x: i32, y: i32) -> bool {
    (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y)
}

/// Clamp a single axis into `[0, GRID_SIZE-1]`
#[inline]
pub fn clamp_coord(v: i32) -> i32 {
    v.clamp(0, GRID_SIZE - 1)
}

/// Clamp a cell onto the field
#[inline]
pub fn clamp_pos(pos: IVec2) -> IVec2 {
    IVec2::new(clamp_coord(pos.x), clamp_coord(pos.y))
}
