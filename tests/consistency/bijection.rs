//! Index and catalog hold the same vector id set after every operation.

use crate::common::*;

fn assert_bijection(t: &TestEngine) {
    let catalog = t.catalog_ids();
    let snapshot = t.snapshot_ids();
    assert_eq!(catalog, snapshot, "catalog and snapshot id sets diverged");

    let info = t.engine.info().expect("info");
    assert_eq!(info.frames as usize, info.vectors);
    assert_eq!(info.frames as usize, catalog.len());
}

#[test]
fn ingest_keeps_sets_equal() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "harbour", 1, 10, &[0.0, 1.0]);
    plant_frame(frames.path(), "meadow", 1, 0, &[0.0, 0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    assert_eq!(t.catalog_ids(), [0, 1, 2]);
    assert_bijection(&t);
}

#[test]
fn removal_keeps_sets_equal() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "harbour", 1, 10, &[0.0, 1.0]);
    plant_frame(frames.path(), "meadow", 1, 0, &[0.0, 0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");
    t.engine.remove_video("harbour").expect("remove");

    assert_eq!(t.catalog_ids(), [2]);
    assert_bijection(&t);
}

#[test]
fn restart_keeps_sets_equal() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "meadow", 1, 0, &[0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");
    let before = t.catalog_ids();

    let t = t.reopen();
    assert_eq!(t.catalog_ids(), before);
    assert_bijection(&t);
}

#[test]
fn interleaved_operations_keep_sets_equal() {
    let harbour = frames_dir();
    plant_frame(harbour.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(harbour.path(), "harbour", 1, 10, &[1.0, 0.1]);
    let meadow = frames_dir();
    plant_frame(meadow.path(), "meadow", 1, 0, &[0.0, 1.0]);
    let stadium = frames_dir();
    plant_frame(stadium.path(), "stadium", 1, 0, &[0.0, 0.0, 1.0]);

    let mut t = TestEngine::new();

    t.engine.ingest_frames(harbour.path()).expect("ingest");
    assert_bijection(&t);

    t.engine.ingest_frames(meadow.path()).expect("ingest");
    assert_bijection(&t);

    t.engine.remove_video("harbour").expect("remove");
    assert_bijection(&t);

    let mut t = t.reopen();
    assert_bijection(&t);

    t.engine.ingest_frames(stadium.path()).expect("ingest");
    assert_bijection(&t);

    t.engine.remove_video("meadow").expect("remove");
    assert_bijection(&t);

    t.engine.remove_video("stadium").expect("remove");
    assert_bijection(&t);
    assert_eq!(t.engine.info().expect("info").frames, 0);
}
