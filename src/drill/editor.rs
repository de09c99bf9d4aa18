//! Editor session
//!
//! Owns a working copy of one drill's sets for the duration of an edit. Input
//! arrives as `EditorCommand`s (or the matching methods), every mutation is
//! followed by a full step-size re-validation, and observable changes are
//! queued as `EditorEvent`s for the host to drain. Nothing reaches the drill
//! store until `save`; dropping or discarding the session throws the edits
//! away.

use serde::{Deserialize, Serialize};

use super::frames::FrameStore;
use super::grid::in_bounds;
use super::physics::{PhysicsWarning, validate_transitions};
use super::playback::{Playback, PlaybackPhase, TickOutcome};
use super::shapes::{ShapeKind, generate_formation};
use super::state::{Drill, DrillFrame, FormationPoint, Member};
use crate::persistence::DrillError;
use crate::settings::EditorSettings;

/// Where committed drills go (and where sessions load them from)
pub trait DrillStore {
    fn load_drill(&self, id: &str) -> Option<Drill>;
    /// Replace the stored drill with the same id, whole-object
    fn commit_drill(&mut self, drill: Drill) -> Result<(), DrillError>;
}

/// Blocking yes/no prompt shown when saving over outstanding warnings
pub trait ConfirmPrompt {
    fn confirm(&mut self, warnings: &[String]) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&[String]) -> bool,
{
    fn confirm(&mut self, warnings: &[String]) -> bool {
        self(warnings)
    }
}

/// User intent, one variant per input the editor understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorCommand {
    SelectMember { member_id: Option<String> },
    ClickCell { x: i32, y: i32 },
    AutoLayout { shape: ShapeKind },
    AddFrame,
    DeleteFrame { index: usize },
    SelectFrame { index: usize },
    TogglePlayback,
}

/// Things the host may want to react to, queued in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorEvent {
    FramesChanged { revision: u64 },
    WarningsUpdated { count: usize },
    SelectionChanged { member_id: Option<String> },
    FrameSelected { index: usize },
    MemberDisplaced { x: i32, y: i32, member_id: String },
    PlaybackStarted,
    PlaybackStopped { index: usize },
    PlaybackFinished,
    Committed { drill_id: String },
    Discarded,
}

/// Result of a save request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Frames written to the store; the session is closed
    Committed,
    /// The user declined to save over warnings; the session is unchanged
    Declined,
}

pub struct EditorSession {
    drill_id: String,
    drill_name: String,
    roster: Vec<Member>,
    store: FrameStore,
    current: usize,
    selected: Option<String>,
    warnings: Vec<PhysicsWarning>,
    playback: Playback,
    events: Vec<EditorEvent>,
    open: bool,
}

impl EditorSession {
    /// Start editing a copy of `drill`
    pub fn open(drill: &Drill, roster: Vec<Member>, settings: &EditorSettings) -> Self {
        let store = FrameStore::new(drill.frames.clone());
        let warnings = validate_transitions(store.frames());
        log::info!(
            "Editing drill '{}' ({} sets, {} members, {} warnings)",
            drill.name,
            store.len(),
            roster.len(),
            warnings.len()
        );

        Self {
            drill_id: drill.id.clone(),
            drill_name: drill.name.clone(),
            roster,
            store,
            current: 0,
            selected: None,
            warnings,
            playback: Playback::new(settings.playback_interval_ms),
            events: Vec::new(),
            open: true,
        }
    }

    /// Start editing the drill `id` from a store, if it exists
    pub fn open_from_store(
        store: &impl DrillStore,
        id: &str,
        roster: Vec<Member>,
        settings: &EditorSettings,
    ) -> Option<Self> {
        let Some(drill) = store.load_drill(id) else {
            log::warn!("No drill with id '{id}' to edit");
            return None;
        };
        Some(Self::open(&drill, roster, settings))
    }

    // === Accessors ===

    pub fn drill_id(&self) -> &str {
        &self.drill_id
    }

    pub fn drill_name(&self) -> &str {
        &self.drill_name
    }

    pub fn roster(&self) -> &[Member] {
        &self.roster
    }

    pub fn frames(&self) -> &[DrillFrame] {
        self.store.frames()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn current_frame_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&DrillFrame> {
        self.store.get(self.current)
    }

    pub fn selected_member(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn warnings(&self) -> &[PhysicsWarning] {
        &self.warnings
    }

    /// Warnings as display strings, using roster names
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.describe(&self.roster)).collect()
    }

    pub fn playback_phase(&self) -> PlaybackPhase {
        self.playback.phase()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Roster members with no point in the current set
    pub fn unplaced_members(&self) -> Vec<&Member> {
        let Some(frame) = self.current_frame() else {
            return Vec::new();
        };
        self.roster
            .iter()
            .filter(|m| frame.point_for(&m.id).is_none())
            .collect()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Dispatch a single command
    pub fn apply(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::SelectMember { member_id } => self.select_member(member_id.as_deref()),
            EditorCommand::ClickCell { x, y } => {
                self.click_cell(x, y);
            }
            EditorCommand::AutoLayout { shape } => self.auto_layout(shape),
            EditorCommand::AddFrame => self.add_frame(),
            EditorCommand::DeleteFrame { index } => self.delete_frame(index),
            EditorCommand::SelectFrame { index } => self.select_frame(index),
            EditorCommand::TogglePlayback => self.toggle_playback(),
        }
    }

    /// Pick up a member (or put down the current one with `None`)
    pub fn select_member(&mut self, member_id: Option<&str>) {
        if !self.ensure_open("select_member") {
            return;
        }
        if let Some(id) = member_id
            && !self.roster.iter().any(|m| m.id == id)
        {
            log::warn!("Ignoring selection of unknown member '{id}'");
            return;
        }
        self.selected = member_id.map(str::to_string);
        self.events.push(EditorEvent::SelectionChanged {
            member_id: self.selected.clone(),
        });
    }

    /// Place the selected member on a cell of the current set
    ///
    /// Returns true if a point was placed. Any earlier point for the member in
    /// this set is removed first; other sets are untouched. Whoever held the
    /// cell before is taken off it and left unplaced in this set.
    pub fn click_cell(&mut self, x: i32, y: i32) -> bool {
        if !self.ensure_open("click_cell") {
            return false;
        }
        let Some(member_id) = self.selected.clone() else {
            return false;
        };
        if !in_bounds(x, y) {
            log::debug!("Click at ({x}, {y}) is off the field");
            return false;
        }
        let Some(frame) = self.store.get(self.current) else {
            return false;
        };

        let displaced: Vec<String> = frame
            .points
            .iter()
            .filter(|p| p.occupies(x, y) && p.member_id != member_id)
            .map(|p| p.member_id.clone())
            .collect();
        let mut points: Vec<FormationPoint> = frame
            .points
            .iter()
            .filter(|p| p.member_id != member_id && !p.occupies(x, y))
            .cloned()
            .collect();
        points.push(FormationPoint::new(member_id.clone(), x, y));
        log::debug!("Placed {member_id} at ({x}, {y}) in set {}", self.current + 1);

        self.store.set_frame_points(self.current, points);
        for occupant in displaced {
            log::debug!("{occupant} displaced from ({x}, {y})");
            self.events.push(EditorEvent::MemberDisplaced {
                x,
                y,
                member_id: occupant,
            });
        }
        self.selected = None;
        self.events.push(EditorEvent::SelectionChanged { member_id: None });
        self.frames_changed();
        true
    }

    /// Lay the whole roster out in `shape` on the current set only
    pub fn auto_layout(&mut self, shape: ShapeKind) {
        if !self.ensure_open("auto_layout") {
            return;
        }
        let points = generate_formation(&self.roster, shape);
        log::debug!(
            "Auto-layout {} for set {} ({} points)",
            shape.as_str(),
            self.current + 1,
            points.len()
        );
        if self.store.set_frame_points(self.current, points) {
            self.frames_changed();
        }
    }

    /// Append a copy of the last set and move to it
    pub fn add_frame(&mut self) {
        if !self.ensure_open("add_frame") {
            return;
        }
        self.current = self.store.add_frame();
        self.frames_changed();
        self.events.push(EditorEvent::FrameSelected {
            index: self.current,
        });
    }

    /// Delete a set; the last remaining set can't be deleted
    pub fn delete_frame(&mut self, index: usize) {
        if !self.ensure_open("delete_frame") {
            return;
        }
        if !self.store.delete_frame(index) {
            return;
        }
        self.current = index.saturating_sub(1).min(self.store.len() - 1);
        self.frames_changed();
        self.events.push(EditorEvent::FrameSelected {
            index: self.current,
        });
    }

    /// Jump to a set. Stops playback; out-of-range indices are ignored.
    pub fn select_frame(&mut self, index: usize) {
        if !self.ensure_open("select_frame") {
            return;
        }
        if index >= self.store.len() {
            log::debug!("select_frame({index}) out of range");
            return;
        }
        self.stop_playback();
        self.current = index;
        self.events.push(EditorEvent::FrameSelected { index });
    }

    pub fn toggle_playback(&mut self) {
        if self.playback.is_playing() {
            self.stop_playback();
        } else {
            self.play();
        }
    }

    pub fn play(&mut self) {
        if !self.ensure_open("play") {
            return;
        }
        self.playback.play();
        log::debug!("Playback started at set {}", self.current + 1);
        self.events.push(EditorEvent::PlaybackStarted);
    }

    /// Stop playback (no-op if already stopped)
    pub fn stop_playback(&mut self) {
        if !self.playback.is_playing() {
            return;
        }
        self.playback.stop();
        self.events.push(EditorEvent::PlaybackStopped {
            index: self.current,
        });
    }

    /// Advance host time by `dt_ms`, running any playback ticks that are due
    pub fn update(&mut self, dt_ms: f64) {
        let frame_count = self.store.len();
        for outcome in self.playback.update(dt_ms, &mut self.current, frame_count) {
            match outcome {
                TickOutcome::Advanced(index) => {
                    self.events.push(EditorEvent::FrameSelected { index });
                }
                TickOutcome::Finished => {
                    self.events.push(EditorEvent::FrameSelected { index: 0 });
                    self.events.push(EditorEvent::PlaybackFinished);
                }
                TickOutcome::Idle => {}
            }
        }
    }

    /// Commit the working sets to `store` and close the session
    ///
    /// With outstanding warnings the prompt must agree first; if it declines
    /// nothing changes. A store error leaves the session open.
    pub fn save(
        &mut self,
        store: &mut impl DrillStore,
        prompt: &mut impl ConfirmPrompt,
    ) -> Result<SaveOutcome, DrillError> {
        if !self.open {
            return Err(DrillError::SessionClosed);
        }
        if !self.warnings.is_empty() {
            let messages = self.warning_messages();
            if !prompt.confirm(&messages) {
                log::info!("Save declined ({} warnings)", messages.len());
                return Ok(SaveOutcome::Declined);
            }
            log::info!("Saving over {} warnings", messages.len());
        }

        let drill = Drill {
            id: self.drill_id.clone(),
            name: self.drill_name.clone(),
            frames: self.store.frames().to_vec(),
        };
        store.commit_drill(drill)?;
        log::info!("Saved drill '{}' ({} sets)", self.drill_name, self.store.len());

        self.close();
        self.events.push(EditorEvent::Committed {
            drill_id: self.drill_id.clone(),
        });
        Ok(SaveOutcome::Committed)
    }

    /// Close without writing anything
    pub fn discard(&mut self) {
        if !self.open {
            return;
        }
        log::info!("Discarded edits to drill '{}'", self.drill_name);
        self.close();
        self.events.push(EditorEvent::Discarded);
    }

    // === Internals ===

    fn close(&mut self) {
        self.stop_playback();
        self.selected = None;
        self.open = false;
    }

    fn ensure_open(&self, action: &str) -> bool {
        if !self.open {
            log::warn!("{action} ignored: session for '{}' is closed", self.drill_name);
        }
        self.open
    }

    /// Re-run validation after any change to the sets
    fn frames_changed(&mut self) {
        self.warnings = validate_transitions(self.store.frames());
        self.events.push(EditorEvent::FramesChanged {
            revision: self.store.revision(),
        });
        self.events.push(EditorEvent::WarningsUpdated {
            count: self.warnings.len(),
        });
    }
}
