//! Drill library
//!
//! All of the player's drills plus which one is active. Persisted to storage
//! as a single versioned JSON document.

use serde::{Deserialize, Serialize};

use crate::drill::{Drill, DrillStore};
use crate::persistence::{DrillError, Envelope};
use crate::platform::KeyValueStore;

/// The drill collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DrillLibrary {
    pub drills: Vec<Drill>,
    pub active_drill_id: Option<String>,
}

impl DrillLibrary {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "drill_editor_library";

    /// Create empty library
    pub fn new() -> Self {
        Self {
            drills: Vec::new(),
            active_drill_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drills.len()
    }

    pub fn get(&self, id: &str) -> Option<&Drill> {
        self.drills.iter().find(|d| d.id == id)
    }

    /// The drill referenced by `active_drill_id`, if it still exists
    pub fn active(&self) -> Option<&Drill> {
        self.active_drill_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), DrillError> {
        if self.get(id).is_none() {
            return Err(DrillError::UnknownDrill(id.to_string()));
        }
        self.active_drill_id = Some(id.to_string());
        Ok(())
    }

    /// Insert or wholesale-replace a drill by id
    ///
    /// Returns the drill it replaced. The first drill added becomes active.
    pub fn upsert(&mut self, drill: Drill) -> Option<Drill> {
        if self.active_drill_id.is_none() {
            self.active_drill_id = Some(drill.id.clone());
        }
        match self.drills.iter_mut().find(|d| d.id == drill.id) {
            Some(existing) => Some(std::mem::replace(existing, drill)),
            None => {
                self.drills.push(drill);
                None
            }
        }
    }

    /// Remove a drill, clearing the active id if it pointed at it
    pub fn remove(&mut self, id: &str) -> Option<Drill> {
        let pos = self.drills.iter().position(|d| d.id == id)?;
        if self.active_drill_id.as_deref() == Some(id) {
            self.active_drill_id = None;
        }
        Some(self.drills.remove(pos))
    }

    /// Load from storage, starting fresh if nothing usable is there
    pub fn load(storage: &impl KeyValueStore) -> Self {
        let Some(json) = storage.get(Self::STORAGE_KEY) else {
            log::info!("No drill library found, starting fresh");
            return Self::new();
        };
        match Envelope::<DrillLibrary>::decode(&json) {
            Ok(library) => {
                log::info!("Loaded {} drills", library.drills.len());
                library
            }
            Err(e) => {
                log::warn!("Ignoring saved drill library: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut impl KeyValueStore) -> Result<(), DrillError> {
        let json = Envelope::new(self.clone()).to_json()?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Drill library saved ({} drills)", self.drills.len());
        Ok(())
    }
}

/// Sessions committing straight into an in-memory library
impl DrillStore for DrillLibrary {
    fn load_drill(&self, id: &str) -> Option<Drill> {
        self.get(id).cloned()
    }

    fn commit_drill(&mut self, drill: Drill) -> Result<(), DrillError> {
        self.upsert(drill);
        Ok(())
    }
}

/// A library bound to its storage: every commit is written through
pub struct StoredLibrary<S: KeyValueStore> {
    library: DrillLibrary,
    storage: S,
}

impl<S: KeyValueStore> StoredLibrary<S> {
    pub fn open(storage: S) -> Self {
        let library = DrillLibrary::load(&storage);
        Self { library, storage }
    }

    pub fn library(&self) -> &DrillLibrary {
        &self.library
    }

    /// Change the library and persist it
    ///
    /// The change only becomes visible once storage accepts it.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut DrillLibrary) -> R) -> Result<R, DrillError> {
        let mut next = self.library.clone();
        let result = f(&mut next);
        next.save(&mut self.storage)?;
        self.library = next;
        Ok(result)
    }
}

impl<S: KeyValueStore> DrillStore for StoredLibrary<S> {
    fn load_drill(&self, id: &str) -> Option<Drill> {
        self.library.load_drill(id)
    }

    /// Write-through; the in-memory library is rolled back if storage fails
    fn commit_drill(&mut self, drill: Drill) -> Result<(), DrillError> {
        let id = drill.id.clone();
        let previous_active = self.library.active_drill_id.clone();
        let replaced = self.library.upsert(drill);

        if let Err(e) = self.library.save(&mut self.storage) {
            match replaced {
                Some(old) => {
                    self.library.upsert(old);
                }
                None => {
                    self.library.remove(&id);
                }
            }
            self.library.active_drill_id = previous_active;
            return Err(e);
        }
        Ok(())
    }
}
