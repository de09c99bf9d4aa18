//! Drill Editor entry point
//!
//! On the web the page drives `platform::web::WebEditor`; this only sets up
//! logging. Natively it runs a short scripted editing session and prints each
//! set to the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Drill Editor starting...");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drill_editor::drill::{Drill, EditorSession, Member, SaveOutcome, ShapeKind};
    use drill_editor::platform::MemoryStorage;
    use drill_editor::preview::render_frame;
    use drill_editor::{DrillLibrary, EditorSettings};

    env_logger::init();
    log::info!("Drill Editor (native) starting...");

    let storage = MemoryStorage::new();
    let settings = EditorSettings::load(&storage);
    let roster = vec![
        Member::new("m1", "Avery", "Trumpet"),
        Member::new("m2", "Blake", "Trumpet"),
        Member::new("m3", "Casey", "Mellophone"),
        Member::new("m4", "Devon", "Trombone"),
        Member::new("m5", "Emery", "Baritone"),
        Member::new("m6", "Finley", "Tuba"),
        Member::new("m7", "Gray", "Snare"),
        Member::new("m8", "Harper", "Bass Drum"),
    ];

    let mut library = DrillLibrary::new();
    library.upsert(Drill::new("demo", "Opener"));
    let Some(mut session) = EditorSession::open_from_store(&library, "demo", roster, &settings)
    else {
        return;
    };

    // Three sets: line, block, circle
    session.auto_layout(ShapeKind::Line);
    session.add_frame();
    session.auto_layout(ShapeKind::Block);
    session.add_frame();
    session.auto_layout(ShapeKind::Circle);

    for frame in session.frames() {
        println!("{}", render_frame(frame, session.roster(), settings.show_member_labels));
    }
    if settings.show_warnings {
        for message in session.warning_messages() {
            println!("! {message}");
        }
    }

    session.select_frame(0);
    session.play();
    while session.playback_phase() == drill_editor::drill::PlaybackPhase::Playing {
        session.update(settings.playback_interval_ms);
        println!("count -> set {}", session.current_frame_index() + 1);
    }

    let mut prompt = |warnings: &[String]| {
        println!("Saving with {} warning(s)", warnings.len());
        true
    };
    match session.save(&mut library, &mut prompt) {
        Ok(SaveOutcome::Committed) => {
            let sets = library.get("demo").map(|d| d.frames.len()).unwrap_or(0);
            println!("Saved 'Opener' with {sets} sets");
        }
        Ok(SaveOutcome::Declined) => println!("Save declined"),
        Err(e) => log::error!("Save failed: {e}"),
    }
}
