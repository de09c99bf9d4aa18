//! Drill data model
//!
//! Everything a saved drill needs to round-trip lives here. Field names are
//! camelCase on the wire so drills written by the browser build load unchanged.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{clamp_coord, in_bounds};

/// A band member as supplied by the roster (read-only to the editor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub instrument: String,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, instrument: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instrument: instrument.into(),
        }
    }
}

/// Look up a member's display name, falling back to the raw id for dangling references
pub fn display_name<'a>(roster: &'a [Member], member_id: &'a str) -> &'a str {
    roster
        .iter()
        .find(|m| m.id == member_id)
        .map(|m| m.name.as_str())
        .unwrap_or(member_id)
}

/// One member's placement within one set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationPoint {
    /// Display key derived from the cell; unique per set only by coordinate
    pub id: String,
    pub x: i32,
    pub y: i32,
    /// Weak reference into the roster
    pub member_id: String,
}

impl FormationPoint {
    /// Create a point, clamping the cell onto the field
    pub fn new(member_id: impl Into<String>, x: i32, y: i32) -> Self {
        let x = clamp_coord(x);
        let y = clamp_coord(y);
        Self {
            id: format!("{x}-{y}"),
            x,
            y,
            member_id: member_id.into(),
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn occupies(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

/// One named set in the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillFrame {
    pub id: u32,
    pub order: usize,
    pub name: String,
    #[serde(default)]
    pub points: Vec<FormationPoint>,
}

impl DrillFrame {
    pub fn new(id: u32, order: usize, points: Vec<FormationPoint>) -> Self {
        Self {
            id,
            order,
            name: format!("Set {}", order + 1),
            points,
        }
    }

    /// Point for a member in this set, if placed
    pub fn point_for(&self, member_id: &str) -> Option<&FormationPoint> {
        self.points.iter().find(|p| p.member_id == member_id)
    }

    /// Point occupying a cell in this set, if any
    pub fn point_at(&self, x: i32, y: i32) -> Option<&FormationPoint> {
        self.points.iter().find(|p| p.occupies(x, y))
    }
}

/// A complete named drill: an ordered sequence of sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub frames: Vec<DrillFrame>,
}

impl Drill {
    /// Create a drill with a single empty set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frames: vec![DrillFrame::new(1, 0, Vec::new())],
        }
    }
}

/// Repair a frame list loaded from outside the editor
///
/// Clamps points onto the field, keeps only the last placement per member in
/// each set, renumbers `order`, and guarantees at least one set.
pub fn sanitize_frames(mut frames: Vec<DrillFrame>) -> Vec<DrillFrame> {
    if frames.is_empty() {
        log::warn!("Drill has no sets, starting with an empty one");
        frames.push(DrillFrame::new(1, 0, Vec::new()));
    }

    for (order, frame) in frames.iter_mut().enumerate() {
        frame.order = order;

        let mut kept: Vec<FormationPoint> = Vec::with_capacity(frame.points.len());
        for point in frame.points.drain(..) {
            let point = if in_bounds(point.x, point.y) {
                point
            } else {
                log::debug!(
                    "Clamping {} at ({}, {}) onto the field",
                    point.member_id,
                    point.x,
                    point.y
                );
                FormationPoint::new(point.member_id, point.x, point.y)
            };
            kept.retain(|p| p.member_id != point.member_id);
            kept.push(point);
        }
        frame.points = kept;
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;

    #[test]
    fn test_point_new_clamps() {
        let p = FormationPoint::new("m1", -2, 99);
        assert_eq!(p.pos(), IVec2::new(0, GRID_SIZE - 1));
        assert_eq!(p.id, format!("0-{}", GRID_SIZE - 1));
    }

    #[test]
    fn test_frame_name_is_one_based() {
        assert_eq!(DrillFrame::new(7, 2, Vec::new()).name, "Set 3");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let roster = vec![Member::new("m1", "Alex", "Trumpet")];
        assert_eq!(display_name(&roster, "m1"), "Alex");
        assert_eq!(display_name(&roster, "ghost"), "ghost");
    }

    #[test]
    fn test_sanitize_empty_gets_one_set() {
        let frames = sanitize_frames(Vec::new());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].points.is_empty());
    }

    #[test]
    fn test_sanitize_dedupes_members_and_clamps() {
        let raw = DrillFrame {
            id: 4,
            order: 9,
            name: "Opener".to_string(),
            points: vec![
                FormationPoint::new("m1", 1, 1),
                FormationPoint {
                    id: "x".to_string(),
                    x: 30,
                    y: -1,
                    member_id: "m2".to_string(),
                },
                FormationPoint::new("m1", 5, 5),
            ],
        };
        let frames = sanitize_frames(vec![raw]);
        let frame = &frames[0];
        assert_eq!(frame.order, 0);
        assert_eq!(frame.name, "Opener");
        assert_eq!(frame.points.len(), 2);
        assert_eq!(frame.point_for("m1").map(|p| p.pos()), Some(IVec2::new(5, 5)));
        assert_eq!(frame.point_for("m2").map(|p| p.pos()), Some(IVec2::new(GRID_SIZE - 1, 0)));
    }

    #[test]
    fn test_drill_json_uses_camel_case() {
        let mut drill = Drill::new("d1", "Halftime");
        drill.frames[0].points.push(FormationPoint::new("m1", 3, 4));
        let json = serde_json::to_string(&drill).unwrap();
        assert!(json.contains("\"memberId\":\"m1\""));
        let back: Drill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, drill);
    }
}
