//! Auto-layout shapes
//!
//! Assigns every roster member a cell in one of a few fixed patterns centred on
//! the field. Layouts are pure: the same roster and shape always give the same
//! points. Coincident cells (small circles) are left as-is.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{CENTER, clamp_pos};
use super::state::{FormationPoint, Member};
use crate::consts::*;
use crate::{polar_to_cartesian, round_half_up};

/// Auto-layout pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// One row across the centre of the field
    #[default]
    Line,
    /// Four-wide rectangle around the centre
    Block,
    /// Evenly spaced ring around the centre
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Line, ShapeKind::Block, ShapeKind::Circle];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Block => "block",
            ShapeKind::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(ShapeKind::Line),
            "block" => Some(ShapeKind::Block),
            "circle" | "ring" => Some(ShapeKind::Circle),
            _ => None,
        }
    }

    /// Raw cell for the member at `index` out of `total`, before clamping
    fn cell(&self, index: usize, total: usize) -> IVec2 {
        let i = index as i32;
        match self {
            ShapeKind::Line => IVec2::new((LINE_START_X + i).min(GRID_SIZE - 1), CENTER.y),
            ShapeKind::Block => IVec2::new(
                CENTER.x - 2 + i % BLOCK_COLUMNS,
                CENTER.y - 2 + i / BLOCK_COLUMNS,
            ),
            ShapeKind::Circle => {
                let angle = index as f64 / total as f64 * std::f64::consts::TAU;
                let offset = polar_to_cartesian(CIRCLE_RADIUS, angle);
                IVec2::new(
                    round_half_up(CENTER.x as f64 + offset.x),
                    round_half_up(CENTER.y as f64 + offset.y),
                )
            }
        }
    }
}

/// Lay out the whole roster in `shape`, one point per member in roster order
pub fn generate_formation(roster: &[Member], shape: ShapeKind) -> Vec<FormationPoint> {
    let total = roster.len();
    roster
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let cell = clamp_pos(shape.cell(index, total));
            FormationPoint::new(member.id.clone(), cell.x, cell.y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::grid::in_bounds;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| Member::new(format!("m{i}"), format!("Member {i}"), "Snare"))
            .collect()
    }

    fn cells(points: &[FormationPoint]) -> Vec<(i32, i32)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_line_layout() {
        let points = generate_formation(&roster(3), ShapeKind::Line);
        assert_eq!(cells(&points), vec![(2, 8), (3, 8), (4, 8)]);
    }

    #[test]
    fn test_line_overflow_collapses_on_last_column() {
        let points = generate_formation(&roster(20), ShapeKind::Line);
        assert_eq!(points.len(), 20);
        assert_eq!((points[13].x, points[13].y), (15, 8));
        assert_eq!((points[19].x, points[19].y), (15, 8));
    }

    #[test]
    fn test_block_layout() {
        let points = generate_formation(&roster(6), ShapeKind::Block);
        assert_eq!(
            cells(&points),
            vec![(6, 6), (7, 6), (8, 6), (9, 6), (6, 7), (7, 7)]
        );
    }

    #[test]
    fn test_block_rows_clamp_at_front() {
        let points = generate_formation(&roster(60), ShapeKind::Block);
        assert!(points.iter().all(|p| p.y <= GRID_SIZE - 1));
        assert_eq!(points[59].y, GRID_SIZE - 1);
    }

    #[test]
    fn test_circle_quarter_points() {
        let points = generate_formation(&roster(4), ShapeKind::Circle);
        assert_eq!(cells(&points), vec![(12, 8), (8, 12), (4, 8), (8, 4)]);
    }

    #[test]
    fn test_circle_single_member() {
        let points = generate_formation(&roster(1), ShapeKind::Circle);
        assert_eq!(cells(&points), vec![(12, 8)]);
    }

    #[test]
    fn test_empty_roster() {
        for shape in ShapeKind::ALL {
            assert!(generate_formation(&[], shape).is_empty());
        }
    }

    #[test]
    fn test_shape_json_matches_as_str() {
        for shape in ShapeKind::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape.as_str()));
            assert_eq!(serde_json::from_str::<ShapeKind>(&json).unwrap(), shape);
        }
    }

    #[test]
    fn test_circle_eight_members() {
        let points = generate_formation(&roster(8), ShapeKind::Circle);
        assert_eq!(
            cells(&points),
            vec![(12, 8), (11, 11), (8, 12), (5, 11), (4, 8), (5, 5), (8, 4), (11, 5)]
        );
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!(ShapeKind::from_str("CIRCLE"), Some(ShapeKind::Circle));
        assert_eq!(ShapeKind::from_str("block"), Some(ShapeKind::Block));
        assert_eq!(ShapeKind::from_str("wedge"), None);
        for shape in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(shape.as_str()), Some(shape));
        }
    }

    fn any_shape() -> impl Strategy<Value = ShapeKind> {
        prop_oneof![
            Just(ShapeKind::Line),
            Just(ShapeKind::Block),
            Just(ShapeKind::Circle),
        ]
    }

    proptest! {
        #[test]
        fn prop_one_point_per_member_on_field(n in 1usize..80, shape in any_shape()) {
            let roster = roster(n);
            let points = generate_formation(&roster, shape);
            prop_assert_eq!(points.len(), n);
            let ids: HashSet<&str> = points.iter().map(|p| p.member_id.as_str()).collect();
            prop_assert_eq!(ids.len(), n);
            prop_assert!(points.iter().all(|p| in_bounds(p.x, p.y)));
        }

        #[test]
        fn prop_layout_is_deterministic(n in 0usize..80, shape in any_shape()) {
            let roster = roster(n);
            prop_assert_eq!(
                generate_formation(&roster, shape),
                generate_formation(&roster, shape)
            );
        }
    }
}
