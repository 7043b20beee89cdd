//! Index snapshot round-trips through restarts.

use crate::common::*;
use std::fs;

#[test]
fn search_results_are_identical_after_reopen() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.1]);
    plant_frame(frames.path(), "harbour", 1, 30, &[1.0, 0.4]);
    plant_frame(frames.path(), "meadow", 2, 10, &[0.2, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    let query = vec_spec(&[1.0, 0.0]);
    let before = t.engine.search(&query, 3, 5.0).expect("search");
    assert_eq!(before.len(), 3);

    let t = t.reopen();
    let after = t.engine.search(&query, 3, 5.0).expect("search");
    assert_eq!(before, after);
}

#[test]
fn removal_survives_reopen() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "meadow", 1, 0, &[0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");
    t.engine.remove_video("harbour").expect("remove");

    let t = t.reopen();
    let info = t.engine.info().expect("info");
    assert_eq!(info.frames, 1);
    assert_eq!(info.videos, 1);

    let hits = t.engine.search(&vec_spec(&[1.0, 0.0]), 5, 0.0).expect("search");
    assert_eq!(filenames(&hits), ["meadow_fps=1_pts=00000000.jpg"]);
}

#[test]
fn snapshot_is_replaced_atomically() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");
    t.engine.remove_video("harbour").expect("remove");

    // No temp files linger after the rename dance.
    let leftovers: Vec<String> = fs::read_dir(t.data_dir())
        .expect("read data dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn empty_engine_round_trips() {
    let t = TestEngine::new();
    let t = t.reopen();
    let info = t.engine.info().expect("info");
    assert_eq!(info.frames, 0);
    assert_eq!(info.vectors, 0);
    assert!(t
        .engine
        .search(&vec_spec(&[1.0]), 3, 5.0)
        .expect("search")
        .is_empty());
}
