//! Concurrency-guard behavior around an in-flight replay: denied and
//! allowed external mutations, overlapping sessions, and the
//! no-mutation guarantee of a rejected validation.

use std::sync::Arc;

use stencil_core::{BlockPos, BlockSpec, Extent, Offset, StructureDoc, StructureStore, WorldHost};
use stencil_engine::{
    build_structure, BuildError, BuildGuard, MutationBus, MutationVerdict, PlaceError, Placer,
};
use stencil_test_utils::{MockStore, MockWorld};

fn two_cell_doc() -> StructureDoc {
    let mut doc = StructureDoc::new(Extent::new(2, 1, 1).unwrap());
    doc.insert(Offset::new(0, 0, 0), BlockSpec::plain("STONE"))
        .unwrap();
    doc.insert(Offset::new(1, 0, 0), BlockSpec::plain("STONE"))
        .unwrap();
    doc
}

#[test]
fn external_mutations_are_denied_only_while_locked() {
    let mut world = MockWorld::new();
    let guard = Arc::new(BuildGuard::new());
    let mut placer = Placer::new(Arc::clone(&guard), 1);
    let bus = MutationBus::new(16);
    let handle = bus.handle();

    let origin = BlockPos::new(10, 5, 10);
    let id = placer.begin(&world, &two_cell_doc(), origin).unwrap();

    // Both target cells are locked while the session is applying.
    let locked_rx = handle.submit(BlockPos::new(11, 5, 10)).unwrap();
    let unlocked_rx = handle.submit(BlockPos::new(12, 5, 10)).unwrap();
    bus.drain(&guard);
    assert!(matches!(
        locked_rx.recv().unwrap(),
        MutationVerdict::Denied { .. }
    ));
    assert_eq!(unlocked_rx.recv().unwrap(), MutationVerdict::Allowed);

    // One write per tick: after the first tick, (10,5,10) is applied
    // and released while (11,5,10) is still owned.
    placer.tick(&mut world);
    let released_rx = handle.submit(BlockPos::new(10, 5, 10)).unwrap();
    let still_locked_rx = handle.submit(BlockPos::new(11, 5, 10)).unwrap();
    bus.drain(&guard);
    assert_eq!(released_rx.recv().unwrap(), MutationVerdict::Allowed);
    assert!(matches!(
        still_locked_rx.recv().unwrap(),
        MutationVerdict::Denied { .. }
    ));

    // After completion the guard has no opinion anywhere.
    let reports = placer.tick(&mut world);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].session, id);
    let after_rx = handle.submit(BlockPos::new(11, 5, 10)).unwrap();
    bus.drain(&guard);
    assert_eq!(after_rx.recv().unwrap(), MutationVerdict::Allowed);
    assert_eq!(guard.locked_count(), 0);
}

#[test]
fn disjoint_replays_may_run_concurrently() {
    let mut world = MockWorld::new();
    let guard = Arc::new(BuildGuard::new());
    let mut placer = Placer::new(Arc::clone(&guard), 1);

    let a = placer
        .begin(&world, &two_cell_doc(), BlockPos::new(0, 0, 0))
        .unwrap();
    let b = placer
        .begin(&world, &two_cell_doc(), BlockPos::new(50, 0, 0))
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(guard.locked_count(), 4);

    // Interleaved application, one write each per tick.
    let mut reports = Vec::new();
    while placer.active_sessions() > 0 {
        reports.extend(placer.tick(&mut world));
    }
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.placed == 2 && !r.is_partial()));
    assert_eq!(guard.locked_count(), 0);
}

#[test]
fn overlapping_replay_is_rejected_not_merged() {
    let world = MockWorld::new();
    let guard = Arc::new(BuildGuard::new());
    let mut placer = Placer::new(Arc::clone(&guard), 1);

    placer
        .begin(&world, &two_cell_doc(), BlockPos::new(0, 0, 0))
        .unwrap();
    let err = placer
        .begin(&world, &two_cell_doc(), BlockPos::new(1, 0, 0))
        .unwrap_err();
    assert_eq!(
        err,
        PlaceError::LockConflict {
            pos: BlockPos::new(1, 0, 0)
        }
    );
    // Only the first session's cells are locked.
    assert_eq!(guard.locked_count(), 2);
}

#[test]
fn area_not_clear_rejection_mutates_nothing() {
    let mut world = MockWorld::new();
    world.put(BlockPos::new(11, 5, 10), BlockSpec::plain("COBBLESTONE"));

    let mut store = MockStore::new();
    let doc = two_cell_doc();
    store
        .save("hut", &stencil_codec::encode(&doc).unwrap())
        .unwrap();

    let guard = Arc::new(BuildGuard::new());
    let mut placer = Placer::new(Arc::clone(&guard), 4);
    let err = build_structure(
        &mut placer,
        &world,
        &store,
        "hut",
        BlockPos::new(10, 5, 10),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Place(PlaceError::AreaNotClear { pos }) if pos == BlockPos::new(11, 5, 10)
    ));
    assert_eq!(world.write_count(), 0);
    assert_eq!(guard.locked_count(), 0);
    // The clutter that caused the rejection is untouched.
    assert_eq!(
        world
            .get_block(BlockPos::new(11, 5, 10))
            .unwrap()
            .material
            .as_str(),
        "COBBLESTONE"
    );
}
