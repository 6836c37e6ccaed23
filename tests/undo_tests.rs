use repeatquill::config::Config;
use repeatquill::document::DocumentId;
use repeatquill::editor::registers::RegisterName;
use repeatquill::editor::repeat::{RegisteredAction, RepeatCount};
use repeatquill::editor::session::SessionManager;
use repeatquill::editor::sync::LifecycleEvent;
use repeatquill::editor::undo::UndoRedo;
use repeatquill::host::SimulatedHost;
use repeatquill::input::KeySequence;

fn setup() -> (SessionManager, SimulatedHost, DocumentId) {
    let doc = DocumentId::new(1);
    let mut host = SimulatedHost::new();
    host.open(doc);
    let mut session = SessionManager::new(Config::default());
    session.open(doc);
    (session, host, doc)
}

/// Runs the wrapped command and lets the simulated host apply it.
fn undo_redo(
    session: &mut SessionManager,
    host: &mut SimulatedHost,
    doc: DocumentId,
    command: UndoRedo,
    count: u32,
) -> bool {
    let was_synced = session
        .wrap_undo_redo(doc, &command.keys(), count, host)
        .unwrap();
    host.edit(doc);
    session.notify(doc, LifecycleEvent::ContentChanged, &*host);
    was_synced
}

#[test]
fn test_undo_when_synced_keeps_action_repeatable() {
    let (mut session, mut host, doc) = setup();
    session.register(doc, KeySequence::from("X"), RepeatCount::Times(2), &host);
    let before = session.context(doc).unwrap().registry().action().cloned();

    assert!(undo_redo(&mut session, &mut host, doc, UndoRedo::Undo, 0));

    let after = session.context(doc).unwrap().registry().action().cloned();
    assert_eq!(before, after);
    let dispatch = session
        .repeat(doc, 0, RegisterName::Unnamed, &mut host)
        .unwrap();
    assert_eq!(dispatch.keys().as_str(), "2X");
}

#[test]
fn test_undo_then_redo_stays_synced() {
    let (mut session, mut host, doc) = setup();
    session.register(doc, KeySequence::from("X"), RepeatCount::None, &host);

    assert!(undo_redo(&mut session, &mut host, doc, UndoRedo::Undo, 0));
    assert!(undo_redo(&mut session, &mut host, doc, UndoRedo::Redo, 0));

    let dispatch = session
        .repeat(doc, 0, RegisterName::Unnamed, &mut host)
        .unwrap();
    assert!(dispatch.is_replay());
}

#[test]
fn test_undo_when_unsynced_stays_unsynced() {
    let (mut session, mut host, doc) = setup();
    session.register(doc, KeySequence::from("X"), RepeatCount::None, &host);
    host.edit(doc);
    session.notify(doc, LifecycleEvent::ContentChanged, &host);
    session.notify(doc, LifecycleEvent::CursorMoved, &host);
    // the cursor-moved resync re-anchored; a second untracked edit unsyncs
    host.edit(doc);
    session.notify(doc, LifecycleEvent::ContentChanged, &host);

    assert!(!undo_redo(&mut session, &mut host, doc, UndoRedo::Undo, 0));

    let dispatch = session
        .repeat(doc, 0, RegisterName::Unnamed, &mut host)
        .unwrap();
    assert!(!dispatch.is_replay());
}

#[test]
fn test_undo_with_nothing_registered() {
    let (mut session, mut host, doc) = setup();
    assert!(!undo_redo(&mut session, &mut host, doc, UndoRedo::Undo, 3));

    let dispatch = session
        .repeat(doc, 0, RegisterName::Unnamed, &mut host)
        .unwrap();
    assert_eq!(dispatch.keys().as_str(), ".");
}

#[test]
fn test_undo_feeds_count_after_pending_input() {
    let (mut session, mut host, doc) = setup();
    host.type_keys(&KeySequence::from("k"));

    session
        .wrap_undo_redo(doc, &UndoRedo::Undo.keys(), 3, &mut host)
        .unwrap();
    assert_eq!(host.pending().as_str(), "k3u");
}

#[test]
fn test_invalidate_after_undo_cancels_resync() {
    let (mut session, mut host, doc) = setup();
    session.register(doc, KeySequence::from("X"), RepeatCount::None, &host);
    session
        .wrap_undo_redo(doc, &UndoRedo::Undo.keys(), 0, &mut host)
        .unwrap();
    session.invalidate(doc);

    host.edit(doc);
    session.notify(doc, LifecycleEvent::ContentChanged, &host);

    let dispatch = session
        .repeat(doc, 0, RegisterName::Unnamed, &mut host)
        .unwrap();
    assert!(!dispatch.is_replay());
}

#[test]
fn test_wrap_arbitrary_command() {
    let (mut session, mut host, doc) = setup();
    session.register(doc, KeySequence::from("X"), RepeatCount::None, &host);

    let was_synced = session
        .wrap_undo_redo(doc, &KeySequence::from("g-"), 2, &mut host)
        .unwrap();
    assert!(was_synced);
    assert_eq!(host.pending().as_str(), "2g-");
    assert_eq!(
        session.context(doc).unwrap().registry().action(),
        Some(&RegisteredAction {
            sequence: KeySequence::from("X"),
            count: RepeatCount::None,
        })
    );
}
