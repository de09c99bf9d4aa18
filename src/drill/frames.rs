//! Working copy of a drill's sets
//!
//! Every successful mutation bumps `revision`, so observers (playback, host
//! bindings) can detect change by comparing a single counter.

use super::state::{DrillFrame, FormationPoint, sanitize_frames};

#[derive(Debug, Clone)]
pub struct FrameStore {
    frames: Vec<DrillFrame>,
    revision: u64,
    next_id: u32,
}

impl FrameStore {
    /// Take ownership of a frame list, repairing it if needed
    pub fn new(frames: Vec<DrillFrame>) -> Self {
        let frames = sanitize_frames(frames);
        let next_id = frames
            .iter()
            .map(|f| f.id)
            .max()
            .map_or(1, |id| id.wrapping_add(1));
        Self {
            frames,
            revision: 0,
            next_id,
        }
    }

    pub fn frames(&self) -> &[DrillFrame] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&DrillFrame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: the timeline keeps at least one set
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Hand the frames back (used when committing a session)
    pub fn into_frames(self) -> Vec<DrillFrame> {
        self.frames
    }

    /// Replace every point of one set. Returns false for an out-of-range index.
    pub fn set_frame_points(&mut self, frame_index: usize, points: Vec<FormationPoint>) -> bool {
        let Some(frame) = self.frames.get_mut(frame_index) else {
            log::warn!("set_frame_points: no set at index {frame_index}");
            return false;
        };
        frame.points = points;
        self.revision += 1;
        true
    }

    /// Append a set that starts as a copy of the last one
    pub fn add_frame(&mut self) -> usize {
        let points = self
            .frames
            .last()
            .map(|f| f.points.clone())
            .unwrap_or_default();
        let order = self.frames.len();
        let id = self.allocate_id();

        self.frames.push(DrillFrame::new(id, order, points));
        self.revision += 1;
        log::debug!("Added set {} (id {id})", order + 1);
        order
    }

    /// Remove a set. No-op when it is the only one or the index is out of range.
    pub fn delete_frame(&mut self, index: usize) -> bool {
        if self.frames.len() <= 1 || index >= self.frames.len() {
            log::debug!("delete_frame({index}) ignored ({} sets)", self.frames.len());
            return false;
        }
        self.frames.remove(index);
        for (order, frame) in self.frames.iter_mut().enumerate() {
            frame.order = order;
        }
        self.revision += 1;
        true
    }

    /// Next id not used by any set; wraps past `u32::MAX`
    fn allocate_id(&mut self) -> u32 {
        let mut id = self.next_id;
        while self.frames.iter().any(|f| f.id == id) {
            id = id.wrapping_add(1);
        }
        self.next_id = id.wrapping_add(1);
        id
    }
}
