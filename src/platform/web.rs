//! Browser host bindings
//!
//! `WebEditor` wraps one editor session for the page's JS. Commands and
//! results cross the boundary as JSON; saving over warnings uses
//! `window.confirm`. Playback is stopped whenever the tab is hidden or the
//! window loses focus, so no tick fires for a page the user isn't looking at.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::storage::LocalStorage;
use crate::drill::{
    ConfirmPrompt, Drill, EditorCommand, EditorSession, Member, PlaybackPhase, SaveOutcome,
    ShapeKind,
};
use crate::library::StoredLibrary;
use crate::persistence::DrillError;
use crate::preview::render_frame;
use crate::settings::EditorSettings;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `window.confirm` with the warnings listed
struct WindowConfirm;

impl ConfirmPrompt for WindowConfirm {
    fn confirm(&mut self, warnings: &[String]) -> bool {
        let message = format!(
            "This drill has {} step-size warning(s):\n\n{}\n\nSave anyway?",
            warnings.len(),
            warnings.join("\n")
        );
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&message).ok())
            .unwrap_or(false)
    }
}

#[wasm_bindgen]
pub struct WebEditor {
    session: Rc<RefCell<EditorSession>>,
    library: StoredLibrary<LocalStorage>,
    settings: EditorSettings,
}

#[wasm_bindgen]
impl WebEditor {
    /// Open the active drill (creating one if the library is empty)
    #[wasm_bindgen(constructor)]
    pub fn new(roster_json: &str) -> Result<WebEditor, JsValue> {
        let roster: Vec<Member> = serde_json::from_str(roster_json).map_err(js_err)?;
        let storage = LocalStorage::open()
            .ok_or_else(|| js_err(DrillError::Storage("LocalStorage unavailable".into())))?;
        let settings = match LocalStorage::open() {
            Some(settings_storage) => EditorSettings::load(&settings_storage),
            None => EditorSettings::default(),
        };
        let mut library = StoredLibrary::open(storage);

        let active = library.library().active().cloned();
        let drill = match active {
            Some(drill) => drill,
            None => {
                let drill = Drill::new("drill-1", "New Drill");
                library
                    .update(|lib| {
                        lib.upsert(drill.clone());
                    })
                    .map_err(js_err)?;
                drill
            }
        };

        let session = Rc::new(RefCell::new(EditorSession::open(&drill, roster, &settings)));
        install_auto_stop(session.clone());

        Ok(WebEditor {
            session,
            library,
            settings,
        })
    }

    /// Apply one command, e.g. `{"type":"clickCell","x":3,"y":5}`
    pub fn apply(&self, command_json: &str) -> Result<(), JsValue> {
        let command: EditorCommand = serde_json::from_str(command_json).map_err(js_err)?;
        self.session.borrow_mut().apply(command);
        Ok(())
    }

    /// Auto-layout with the configured default shape, or a named one
    pub fn auto_layout(&self, shape: Option<String>) {
        let shape = shape
            .as_deref()
            .and_then(ShapeKind::from_str)
            .unwrap_or(self.settings.default_shape);
        self.session.borrow_mut().auto_layout(shape);
    }

    /// Advance playback by the time since the last animation frame
    pub fn update(&self, dt_ms: f64) {
        self.session.borrow_mut().update(dt_ms);
    }

    pub fn current_frame_index(&self) -> usize {
        self.session.borrow().current_frame_index()
    }

    pub fn is_playing(&self) -> bool {
        self.session.borrow().playback_phase() == PlaybackPhase::Playing
    }

    pub fn revision(&self) -> u64 {
        self.session.borrow().revision()
    }

    pub fn frames_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.borrow().frames()).map_err(js_err)
    }

    /// Warning messages, or an empty list when warnings are hidden
    pub fn warnings_json(&self) -> Result<String, JsValue> {
        let messages = if self.settings.show_warnings {
            self.session.borrow().warning_messages()
        } else {
            Vec::new()
        };
        serde_json::to_string(&messages).map_err(js_err)
    }

    pub fn drain_events_json(&self) -> Result<String, JsValue> {
        let events = self.session.borrow_mut().drain_events();
        serde_json::to_string(&events).map_err(js_err)
    }

    /// Text preview of the current set (debug overlay)
    pub fn preview(&self) -> String {
        let session = self.session.borrow();
        session
            .current_frame()
            .map(|f| render_frame(f, session.roster(), self.settings.show_member_labels))
            .unwrap_or_default()
    }

    /// Returns true if the drill was written
    pub fn save(&mut self) -> Result<bool, JsValue> {
        let outcome = self
            .session
            .borrow_mut()
            .save(&mut self.library, &mut WindowConfirm)
            .map_err(js_err)?;
        Ok(outcome == SaveOutcome::Committed)
    }

    pub fn discard(&self) {
        self.session.borrow_mut().discard();
    }
}

fn stop_if_playing(session: &RefCell<EditorSession>, reason: &str) {
    if let Ok(mut s) = session.try_borrow_mut()
        && s.playback_phase() == PlaybackPhase::Playing
    {
        s.stop_playback();
        log::info!("Playback stopped ({reason})");
    }
}

/// Stop playback when the page is hidden or loses focus
fn install_auto_stop(session: Rc<RefCell<EditorSession>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // Visibility change (tab switch, minimize)
    {
        let session = session.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                stop_if_playing(&session, "tab hidden");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window blur (click outside)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            stop_if_playing(&session, "window blur");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
