//! Drill Editor - marching band formation authoring
//!
//! Core modules:
//! - `drill`: Formation timeline, shape layout, step validation, playback, editor session
//! - `library`: Drill collection and the commit target for editor sessions
//! - `persistence`: Versioned JSON envelope and storage errors
//! - `platform`: Browser/native storage and host bindings
//! - `preview`: Plain-text rendering of a single set
//! - `settings`: Editor preferences

pub mod drill;
pub mod library;
pub mod persistence;
pub mod platform;
pub mod preview;
pub mod settings;

pub use library::DrillLibrary;
pub use persistence::DrillError;
pub use settings::EditorSettings;

use glam::{DVec2, IVec2};

/// Editor configuration constants
pub mod consts {
    /// Width and height of the field grid, in cells
    pub const GRID_SIZE: i32 = 16;
    /// Centre cell on both axes
    pub const GRID_CENTER: i32 = GRID_SIZE / 2;

    /// Furthest a member may travel between two adjacent sets (8-to-5 step, in grid units)
    pub const MAX_STEP_SIZE: f32 = 4.0;

    /// Duration of one set during playback (one count of music)
    pub const PLAYBACK_INTERVAL_MS: f64 = 1000.0;
    /// Maximum playback ticks fired by one host update
    pub const MAX_TICKS_PER_UPDATE: u32 = 8;

    /// Radius of the circle auto-layout
    pub const CIRCLE_RADIUS: f64 = 4.0;
    /// Columns in the block auto-layout
    pub const BLOCK_COLUMNS: i32 = 4;
    /// First column used by the line auto-layout
    pub const LINE_START_X: i32 = 2;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Round to the nearest integer, ties toward positive infinity
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Euclidean distance between two grid cells
#[inline]
pub fn grid_distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}
