//! Plain-text preview of a set
//!
//! One character per cell, front sideline at the bottom:
//! - `.` empty cell
//! - first letter of the member's name (or `o` with labels off)
//! - `?` a point whose member is no longer on the roster
//! - `*` two or more members stacked on one cell

use crate::consts::GRID_SIZE;
use crate::drill::{DrillFrame, Member};

pub fn render_frame(frame: &DrillFrame, roster: &[Member], labels: bool) -> String {
    let size = GRID_SIZE as usize;
    let mut cells = vec!['.'; size * size];

    for point in &frame.points {
        let idx = point.y as usize * size + point.x as usize;
        let Some(cell) = cells.get_mut(idx) else {
            continue;
        };
        *cell = if *cell != '.' {
            '*'
        } else {
            match roster.iter().find(|m| m.id == point.member_id) {
                None => '?',
                Some(_) if !labels => 'o',
                Some(member) => member.name.chars().next().unwrap_or('o'),
            }
        };
    }

    let mut out = String::with_capacity((size + 1) * (size + 1) + frame.name.len());
    out.push_str(&frame.name);
    out.push('\n');
    for row in cells.chunks(size).rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
