use super::*;

use std::fs;
use std::io;

use crate::probe::LocalFs;
use crate::testing::{FakeEntry, FakeFs};

#[test]
fn touch_passes_the_path_through() {
    let fs = FakeFs::new();

    touch(&fs, Path::new("/tmp/foo")).expect("touch");
    assert_eq!(fs.calls(), vec!["touch /tmp/foo"]);
}

#[test]
fn touch_failure_keeps_kind_and_message() {
    let fs = FakeFs::new().failing_touch(io::ErrorKind::PermissionDenied);

    let err = touch(&fs, Path::new("/tmp/foo")).expect_err("touch should fail");

    match &err {
        FsError::Touch { path, source } => {
            assert_eq!(path, Path::new("/tmp/foo"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(
        err.to_string()
            .starts_with("Could not touch file '/tmp/foo': PermissionDenied: "),
        "got {err}"
    );
}

#[test]
fn remove_missing_path_does_not_mutate() {
    let fs = FakeFs::new();

    let err = remove(&fs, Path::new("/tmp/foo")).expect_err("remove should fail");

    assert!(matches!(err, FsError::NotFound { .. }), "got {err:?}");
    assert!(fs.calls().is_empty());
}

#[test]
fn remove_failure_is_wrapped() {
    let fs = FakeFs::new()
        .with("/tmp/foo", FakeEntry::file(0o100644, 0, "x"))
        .failing_remove(io::ErrorKind::PermissionDenied);

    let err = remove(&fs, Path::new("/tmp/foo")).expect_err("remove should fail");
    assert!(matches!(err, FsError::Remove { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Could not remove file '/tmp/foo': PermissionDenied"));
}

#[test]
fn remove_existing_path() {
    let fs = FakeFs::new().with("/tmp/foo", FakeEntry::file(0o100644, 0, "x"));

    remove(&fs, Path::new("/tmp/foo")).expect("remove");
    assert_eq!(fs.calls(), vec!["remove /tmp/foo"]);
}

#[test]
fn local_touch_then_remove() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("touch.me");

    touch(&LocalFs, &path).expect("touch");
    assert!(path.is_file());

    remove(&LocalFs, &path).expect("remove");
    assert!(!path.exists());

    let err = remove(&LocalFs, &path).expect_err("second remove");
    assert!(matches!(err, FsError::NotFound { .. }));
}

#[test]
fn local_remove_of_non_empty_directory_fails() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("dir");
    fs::create_dir(&dir).expect("create dir");
    fs::write(dir.join("child"), b"").expect("write child");

    let err = remove(&LocalFs, &dir).expect_err("remove should fail");
    assert!(matches!(err, FsError::Remove { .. }), "got {err:?}");
    assert!(dir.join("child").exists());
}
