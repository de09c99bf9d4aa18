//! End-to-end editing session against a storage-backed library

use drill_editor::drill::{
    Drill, DrillStore, EditorCommand, EditorEvent, EditorSession, Member, PlaybackPhase,
    SaveOutcome, ShapeKind,
};
use drill_editor::library::StoredLibrary;
use drill_editor::platform::MemoryStorage;
use drill_editor::{DrillLibrary, EditorSettings};

fn roster() -> Vec<Member> {
    vec![
        Member::new("m1", "Avery", "Trumpet"),
        Member::new("m2", "Blake", "Clarinet"),
        Member::new("m3", "Casey", "Snare"),
        Member::new("m4", "Devon", "Tuba"),
    ]
}

fn stored_with_drill() -> StoredLibrary<MemoryStorage> {
    let mut stored = StoredLibrary::open(MemoryStorage::new());
    stored
        .update(|lib| {
            lib.upsert(Drill::new("show", "Field Show"));
        })
        .unwrap();
    stored
}

#[test]
fn author_three_sets_play_and_save() {
    let mut stored = stored_with_drill();
    let settings = EditorSettings::default();
    let mut session = EditorSession::open_from_store(&stored, "show", roster(), &settings).unwrap();

    session.apply(EditorCommand::AutoLayout {
        shape: ShapeKind::Block,
    });
    session.apply(EditorCommand::AddFrame);
    // Added set starts identical to the one before it
    assert_eq!(session.frames()[1].points, session.frames()[0].points);

    // Nudge one member a single step
    session.apply(EditorCommand::SelectMember {
        member_id: Some("m1".to_string()),
    });
    session.apply(EditorCommand::ClickCell { x: 6, y: 5 });
    session.apply(EditorCommand::AddFrame);
    assert!(session.warnings().is_empty());

    // Play from the top: 0 -> 1 -> 2, then rewind and stop
    session.apply(EditorCommand::SelectFrame { index: 0 });
    session.apply(EditorCommand::TogglePlayback);
    for expected in [1, 2] {
        session.update(settings.playback_interval_ms);
        assert_eq!(session.current_frame_index(), expected);
    }
    session.update(settings.playback_interval_ms);
    assert_eq!(session.playback_phase(), PlaybackPhase::Stopped);
    assert_eq!(session.current_frame_index(), 0);

    let outcome = session
        .save(&mut stored, &mut |_: &[String]| -> bool { panic!("no warnings, no prompt") })
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Committed);
    assert!(session.drain_events().contains(&EditorEvent::Committed {
        drill_id: "show".to_string()
    }));

    // Survives a reload from storage
    let saved = stored.load_drill("show").unwrap();
    assert_eq!(saved.frames.len(), 3);
    let m1 = saved.frames[1].point_for("m1").unwrap();
    assert_eq!((m1.x, m1.y), (6, 5));
}

#[test]
fn big_move_needs_confirmation() {
    let mut stored = stored_with_drill();
    let mut session =
        EditorSession::open_from_store(&stored, "show", roster(), &EditorSettings::default())
            .unwrap();

    session.select_member(Some("m3"));
    session.click_cell(0, 0);
    session.add_frame();
    session.select_member(Some("m3"));
    session.click_cell(10, 10);
    // Entering members are never flagged
    session.select_member(Some("m4"));
    session.click_cell(15, 15);

    assert_eq!(session.warning_messages(), vec!["Set 2: Casey moves 14.1 steps (max 4)"]);

    let declined = session.save(&mut stored, &mut |_: &[String]| false).unwrap();
    assert_eq!(declined, SaveOutcome::Declined);
    assert_eq!(stored.library().get("show"), Some(&Drill::new("show", "Field Show")));

    let committed = session.save(&mut stored, &mut |_: &[String]| true).unwrap();
    assert_eq!(committed, SaveOutcome::Committed);
    assert_eq!(stored.library().get("show").unwrap().frames.len(), 2);
}

#[test]
fn discarded_session_leaves_library_alone() {
    let mut library = DrillLibrary::new();
    library.upsert(Drill::new("show", "Field Show"));
    let before = library.clone();

    let mut session =
        EditorSession::open_from_store(&library, "show", roster(), &EditorSettings::default())
            .unwrap();
    session.auto_layout(ShapeKind::Circle);
    session.add_frame();
    session.delete_frame(0);
    session.delete_frame(0);
    assert_eq!(session.frames().len(), 1);
    session.discard();

    assert_eq!(library, before);
    assert!(session.drain_events().contains(&EditorEvent::Discarded));
}
