mod common;

use std::fs;

use common::{Sandbox, ok, run};
use minish_application::Flow;
use minish_core::error::ShellError;
use minish_core::undo::UndoAction;

#[test]
fn test_discard_then_revert_restores_bytes() {
    let sandbox = Sandbox::new();
    let file = sandbox.write("file.txt", "hello\nworld\n");
    let mut shell = sandbox.open();

    ok(&mut shell, "discard file.txt");
    assert_eq!(shell.sequence(), 1);
    assert_eq!(sandbox.history(), "1. discard file.txt\n");
    assert!(!file.exists());
    assert_eq!(
        fs::read_to_string(sandbox.trash().join("file.txt")).unwrap(),
        "hello\nworld\n"
    );

    let flow = run(&mut shell, "revert").unwrap();
    assert_eq!(
        flow.output().and_then(|o| o.info.as_deref()),
        Some("Reverted: restore 1 discarded item(s)")
    );

    assert_eq!(fs::read_to_string(&file).unwrap(), "hello\nworld\n");
    assert!(!sandbox.trash().join("file.txt").exists());
    assert_eq!(sandbox.history(), "");
    // revert is not a numbered command
    assert_eq!(shell.sequence(), 1);
    assert_eq!(sandbox.counter(), "1");
    assert!(shell.pending_undo().is_none());
}

#[test]
fn test_revert_after_duplicate_removes_copy() {
    let sandbox = Sandbox::new();
    let src = sandbox.write("src.txt", "original");
    let mut shell = sandbox.open();

    ok(&mut shell, "duplicate src.txt dst.txt");
    let dst = sandbox.work.join("dst.txt");
    assert_eq!(fs::read_to_string(&dst).unwrap(), "original");

    ok(&mut shell, "revert");
    assert!(!dst.exists());
    assert_eq!(fs::read_to_string(&src).unwrap(), "original");
}

#[test]
fn test_revert_after_recursive_duplicate_removes_tree() {
    let sandbox = Sandbox::new();
    sandbox.write("src_dir/file.txt", "x");
    let mut shell = sandbox.open();

    ok(&mut shell, "duplicate -r src_dir dst_dir");
    assert!(sandbox.work.join("dst_dir/file.txt").exists());

    ok(&mut shell, "revert");
    assert!(!sandbox.work.join("dst_dir").exists());
    assert!(sandbox.work.join("src_dir/file.txt").exists());
}

#[test]
fn test_revert_after_relocate_restores_source() {
    let sandbox = Sandbox::new();
    let src = sandbox.write("src.txt", "moving");
    let mut shell = sandbox.open();

    ok(&mut shell, "relocate src.txt dst.txt");
    let dst = sandbox.work.join("dst.txt");
    assert!(!src.exists());
    assert!(dst.exists());

    ok(&mut shell, "revert");
    assert_eq!(fs::read_to_string(&src).unwrap(), "moving");
    assert!(!dst.exists());
}

#[test]
fn test_relocate_into_directory_and_back() {
    let sandbox = Sandbox::new();
    let src = sandbox.write("a.txt", "a");
    fs::create_dir(sandbox.work.join("box")).unwrap();
    let mut shell = sandbox.open();

    ok(&mut shell, "relocate a.txt box");
    assert!(sandbox.work.join("box/a.txt").exists());
    assert_eq!(
        shell.pending_undo(),
        Some(&UndoAction::RestoreMoved {
            current: sandbox.work.join("box/a.txt"),
            original: src.clone(),
        })
    );

    ok(&mut shell, "revert");
    assert!(src.exists());
    assert!(sandbox.work.join("box").is_dir());
}

#[test]
fn test_same_base_name_staged_twice() {
    let sandbox = Sandbox::new();
    sandbox.write("one/name", "first");
    sandbox.write("two/name", "second");
    let mut shell = sandbox.open();

    ok(&mut shell, "discard one/name");
    ok(&mut shell, "discard two/name");

    assert_eq!(
        fs::read_to_string(sandbox.trash().join("name")).unwrap(),
        "first"
    );
    assert_eq!(
        fs::read_to_string(sandbox.trash().join("name_1")).unwrap(),
        "second"
    );
}

#[test]
fn test_revert_with_nothing_pending_is_informational() {
    let sandbox = Sandbox::new();
    let mut shell = sandbox.open();
    ok(&mut shell, "list");
    let before = sandbox.history();

    let flow = run(&mut shell, "revert").unwrap();
    assert_eq!(
        flow.output().and_then(|o| o.info.as_deref()),
        Some("No action to undo")
    );
    assert_eq!(sandbox.history(), before);
    assert_eq!(shell.sequence(), 1);
    assert!(shell.pending_undo().is_none());
}

#[test]
fn test_only_most_recent_action_is_recoverable() {
    let sandbox = Sandbox::new();
    let a = sandbox.write("a.txt", "a");
    let b = sandbox.write("b.txt", "b");
    let mut shell = sandbox.open();

    ok(&mut shell, "discard a.txt");
    ok(&mut shell, "discard b.txt");
    ok(&mut shell, "revert");

    assert!(b.exists());
    assert!(!a.exists());
    assert_eq!(sandbox.history(), "1. discard a.txt\n");

    let flow = run(&mut shell, "revert").unwrap();
    assert_eq!(
        flow.output().and_then(|o| o.info.as_deref()),
        Some("No action to undo")
    );
    assert!(!a.exists());
}

#[test]
fn test_revert_of_multi_operand_discard_restores_all() {
    let sandbox = Sandbox::new();
    let a = sandbox.write("a.txt", "a");
    let b = sandbox.write("b.txt", "b");
    let dir = sandbox.work.join("dir");
    sandbox.write("dir/inner.txt", "inner");
    let mut shell = sandbox.open();

    ok(&mut shell, "discard -r a.txt b.txt dir");
    assert!(!a.exists() && !b.exists() && !dir.exists());

    ok(&mut shell, "revert");
    assert_eq!(fs::read_to_string(&a).unwrap(), "a");
    assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    assert_eq!(fs::read_to_string(dir.join("inner.txt")).unwrap(), "inner");
    assert_eq!(fs::read_dir(sandbox.trash()).unwrap().count(), 0);
}

#[test]
fn test_failed_inverse_keeps_slot_for_retry() {
    let sandbox = Sandbox::new();
    let src = sandbox.write("src.txt", "mine");
    let mut shell = sandbox.open();

    ok(&mut shell, "relocate src.txt dst.txt");
    // something else takes the original name
    fs::write(&src, "intruder").unwrap();

    let err = run(&mut shell, "revert").unwrap_err();
    assert!(err.is_already_exists());
    assert!(shell.pending_undo().is_some());
    assert_eq!(sandbox.history(), "1. relocate src.txt dst.txt\n");

    fs::remove_file(&src).unwrap();
    ok(&mut shell, "revert");
    assert_eq!(fs::read_to_string(&src).unwrap(), "mine");
    assert_eq!(sandbox.history(), "");
}

#[test]
fn test_partial_restore_keeps_remaining_entries() {
    let sandbox = Sandbox::new();
    let a = sandbox.write("a.txt", "a");
    let b = sandbox.write("b.txt", "b");
    let mut shell = sandbox.open();

    ok(&mut shell, "discard a.txt b.txt");
    fs::write(&a, "blocker").unwrap();

    // b is restored first, a is blocked
    let err = run(&mut shell, "revert").unwrap_err();
    assert!(err.is_already_exists());
    assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    match shell.pending_undo() {
        Some(UndoAction::RestoreDiscarded { entries }) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].original_path, a);
        }
        other => panic!("unexpected pending undo: {:?}", other),
    }

    fs::remove_file(&a).unwrap();
    ok(&mut shell, "revert");
    assert_eq!(fs::read_to_string(&a).unwrap(), "a");
}

#[test]
fn test_undo_slot_is_not_persistent() {
    let sandbox = Sandbox::new();
    let file = sandbox.write("file.txt", "x");
    {
        let mut shell = sandbox.open();
        ok(&mut shell, "discard file.txt");
    }

    let mut shell = sandbox.open();
    assert!(shell.pending_undo().is_none());
    let flow = run(&mut shell, "revert").unwrap();
    assert_eq!(
        flow,
        Flow::Continue(minish_application::CommandOutput::info("No action to undo"))
    );
    assert!(!file.exists());
}

#[test]
fn test_failed_commit_undoes_discard_and_keeps_older_undo() {
    let sandbox = Sandbox::new();
    let a = sandbox.write("a.txt", "a");
    let b = sandbox.write("b.txt", "b");
    let (mut shell, broken) = sandbox.open_flaky();

    ok(&mut shell, "discard a.txt");
    broken.set(true);
    let err = run(&mut shell, "discard b.txt").unwrap_err();
    assert!(matches!(err, ShellError::Io { .. }));

    assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    assert!(!sandbox.trash().join("b.txt").exists());
    assert_eq!(sandbox.history(), "1. discard a.txt\n");
    assert_eq!(sandbox.counter(), "1");
    assert_eq!(shell.sequence(), 1);
    match shell.pending_undo() {
        Some(UndoAction::RestoreDiscarded { entries }) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].original_path, a);
        }
        other => panic!("unexpected pending undo: {:?}", other),
    }

    broken.set(false);
    ok(&mut shell, "revert");
    assert_eq!(fs::read_to_string(&a).unwrap(), "a");
    assert_eq!(sandbox.history(), "");
}

#[test]
fn test_failed_commit_leaves_nothing_behind() {
    let sandbox = Sandbox::new();
    let src = sandbox.write("src.txt", "payload");
    fs::create_dir(sandbox.work.join("sub")).unwrap();
    let (mut shell, broken) = sandbox.open_flaky();
    broken.set(true);

    assert!(run(&mut shell, "duplicate src.txt copy.txt").is_err());
    assert!(!sandbox.work.join("copy.txt").exists());

    assert!(run(&mut shell, "relocate src.txt sub").is_err());
    assert!(src.exists());
    assert!(!sandbox.work.join("sub/src.txt").exists());

    assert!(run(&mut shell, "goto sub").is_err());
    assert_eq!(shell.working_dir(), sandbox.work);

    assert!(shell.pending_undo().is_none());
    assert_eq!(sandbox.history(), "");
    assert_eq!(shell.sequence(), 0);
}
