//! Vector id allocation: catalog max plus one, never index size.

use crate::common::*;

#[test]
fn ids_are_sequential_from_zero() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0]);
    plant_frame(frames.path(), "harbour", 1, 1, &[1.0, 1.0]);
    plant_frame(frames.path(), "harbour", 1, 2, &[1.0, 2.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");
    assert_eq!(t.catalog_ids(), [0, 1, 2]);
}

#[test]
fn allocation_follows_catalog_max_not_index_size() {
    let first = frames_dir();
    plant_frame(first.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(first.path(), "harbour", 1, 1, &[1.0, 1.0]);
    plant_frame(first.path(), "meadow", 1, 0, &[0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(first.path()).expect("ingest");
    assert_eq!(t.catalog_ids(), [0, 1, 2]);

    // Dropping harbour leaves one row but ids 0 and 1 stay burned: the
    // next allocation continues from the catalog's max id, not from the
    // index's vector count.
    t.engine.remove_video("harbour").expect("remove");
    assert_eq!(t.catalog_ids(), [2]);

    let second = frames_dir();
    plant_frame(second.path(), "stadium", 1, 0, &[0.0, 0.0, 1.0]);
    plant_frame(second.path(), "stadium", 1, 1, &[0.0, 0.0, 1.0, 1.0]);
    t.engine.ingest_frames(second.path()).expect("ingest");
    assert_eq!(t.catalog_ids(), [2, 3, 4]);
}

#[test]
fn restart_does_not_reset_allocation() {
    let first = frames_dir();
    plant_frame(first.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(first.path(), "harbour", 1, 1, &[1.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(first.path()).expect("ingest");

    let mut t = t.reopen();
    let second = frames_dir();
    plant_frame(second.path(), "meadow", 1, 0, &[0.0, 1.0]);
    t.engine.ingest_frames(second.path()).expect("ingest");

    assert_eq!(t.catalog_ids(), [0, 1, 2]);
}

#[test]
fn removal_and_restart_still_advance_ids() {
    let first = frames_dir();
    plant_frame(first.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(first.path(), "meadow", 1, 0, &[0.0, 1.0]);
    plant_frame(first.path(), "meadow", 1, 5, &[0.0, 1.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(first.path()).expect("ingest");
    assert_eq!(t.catalog_ids(), [0, 1, 2]);

    t.engine.remove_video("harbour").expect("remove");
    let mut t = t.reopen();

    let second = frames_dir();
    plant_frame(second.path(), "stadium", 1, 0, &[0.0, 0.0, 1.0]);
    t.engine.ingest_frames(second.path()).expect("ingest");

    // Id 0 stays burned across the restart.
    assert_eq!(t.catalog_ids(), [1, 2, 3]);
}
