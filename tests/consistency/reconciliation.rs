//! Open-time repair of index/catalog divergence.

use crate::common::*;
use std::fs;

#[test]
fn missing_snapshot_purges_catalog_and_allows_reingest() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "harbour", 1, 10, &[0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    let dir = t.close();
    fs::remove_file(dir.path().join("frames.index")).expect("remove snapshot");

    let mut t = TestEngine::from_dir(dir);
    let info = t.engine.info().expect("info");
    assert_eq!(info.vectors, 0);
    assert_eq!(info.frames, 0);
    assert_eq!(info.videos, 0);

    // With their catalog rows gone, the frame files count as new again.
    let report = t.engine.ingest_frames(frames.path()).expect("ingest");
    assert_eq!(report.indexed, 2);
    assert_eq!(t.engine.info().expect("info").frames, 2);
}

#[test]
fn corrupt_snapshot_purges_catalog_and_allows_reingest() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    let dir = t.close();
    fs::write(dir.path().join("frames.index"), b"garbage bytes").expect("corrupt snapshot");

    let mut t = TestEngine::from_dir(dir);
    assert_eq!(t.engine.info().expect("info").frames, 0);

    let report = t.engine.ingest_frames(frames.path()).expect("ingest");
    assert_eq!(report.indexed, 1);

    let hits = t.engine.search(&vec_spec(&[1.0, 0.0]), 1, 0.0).expect("search");
    assert_eq!(filenames(&hits), ["harbour_fps=1_pts=00000000.jpg"]);
}

#[test]
fn orphaned_catalog_row_is_deleted_on_open() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    let dir = t.close();
    {
        let mut catalog = Catalog::open(&dir.path().join("catalog.db")).expect("open catalog");
        catalog
            .insert_frames(&[NewFrame {
                vector_id: VectorId::new(999),
                video_name: "ghost".to_string(),
                timestamp: 0.0,
                filename: "ghost_fps=1_pts=00000000.jpg".to_string(),
            }])
            .expect("insert orphan");
    }

    let t = TestEngine::from_dir(dir);
    assert_eq!(t.catalog_ids(), [0]);
    let info = t.engine.info().expect("info");
    assert_eq!(info.frames, 1);
    assert_eq!(info.videos, 1);
}

#[test]
fn stale_index_vector_is_dropped_on_open() {
    let frames = frames_dir();
    plant_frame(frames.path(), "harbour", 1, 0, &[1.0, 0.0]);
    plant_frame(frames.path(), "harbour", 1, 10, &[0.0, 1.0]);

    let mut t = TestEngine::new();
    t.engine.ingest_frames(frames.path()).expect("ingest");

    let dir = t.close();
    {
        let mut catalog = Catalog::open(&dir.path().join("catalog.db")).expect("open catalog");
        catalog
            .delete_frames(&[VectorId::new(0)])
            .expect("delete row");
    }

    let t = TestEngine::from_dir(dir);
    // The vector with no row is gone from the rewritten snapshot.
    assert_eq!(t.snapshot_ids(), [1]);
    assert_eq!(t.catalog_ids(), [1]);

    let hits = t
        .engine
        .search(&vec_spec(&[1.0, 0.0]), 2, 0.0)
        .expect("search");
    assert_eq!(filenames(&hits), ["harbour_fps=1_pts=00000010.jpg"]);
}
