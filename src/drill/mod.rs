//! Drill formation editing
//!
//! Everything that touches sets lives here. This module must stay pure and
//! deterministic:
//! - No clocks: playback time is fed in by the host
//! - No randomness in layouts
//! - No rendering or platform dependencies

pub mod editor;
pub mod frames;
pub mod grid;
pub mod physics;
pub mod playback;
pub mod shapes;
pub mod state;

pub use editor::{ConfirmPrompt, DrillStore, EditorCommand, EditorEvent, EditorSession, SaveOutcome};
pub use frames::FrameStore;
pub use physics::{PhysicsWarning, validate_transitions};
pub use playback::{Playback, PlaybackPhase, TickOutcome};
pub use shapes::{ShapeKind, generate_formation};
pub use state::{Drill, DrillFrame, FormationPoint, Member, display_name, sanitize_frames};
