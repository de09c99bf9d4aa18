//! Step-size validation between adjacent sets
//!
//! Marching 8-to-5 caps how far anyone can travel in one count. A member whose
//! cell changes by more than `MAX_STEP_SIZE` between two consecutive sets gets a
//! warning. Members missing from either set are entering or leaving the field
//! and are not checked. Warnings are advisory; nothing here mutates the drill.

use std::fmt;

use super::state::{DrillFrame, Member, display_name};
use crate::consts::MAX_STEP_SIZE;
use crate::grid_distance;

/// A member moving further than one step allows
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsWarning {
    /// 1-based display number of the set being moved into
    pub set_number: usize,
    pub member_id: String,
    /// Euclidean distance travelled, in grid units
    pub distance: f32,
}

impl PhysicsWarning {
    /// Human-readable message using roster names where the member is known
    pub fn describe(&self, roster: &[Member]) -> String {
        format_warning(self.set_number, display_name(roster, &self.member_id), self.distance)
    }
}

impl fmt::Display for PhysicsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_warning(self.set_number, &self.member_id, self.distance))
    }
}

fn format_warning(set_number: usize, who: &str, distance: f32) -> String {
    format!("Set {set_number}: {who} moves {distance:.1} steps (max {MAX_STEP_SIZE})")
}

/// Scan every adjacent pair of sets for over-long moves
///
/// Order: by transition, then by member order within the earlier set.
pub fn validate_transitions(frames: &[DrillFrame]) -> Vec<PhysicsWarning> {
    let mut warnings = Vec::new();

    for (i, pair) in frames.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        for from in &prev.points {
            let Some(to) = next.point_for(&from.member_id) else {
                continue;
            };
            let distance = grid_distance(from.pos(), to.pos());
            if distance > MAX_STEP_SIZE {
                warnings.push(PhysicsWarning {
                    set_number: i + 2,
                    member_id: from.member_id.clone(),
                    distance,
                });
            }
        }
    }

    warnings
}
