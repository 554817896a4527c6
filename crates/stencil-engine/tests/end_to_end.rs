//! Full-pipeline tests: capture → encode → store → load → decode →
//! replay, driven through the mock collaborators.

use std::sync::Arc;

use stencil_core::{
    ActorId, BlockPayload, BlockPos, BlockSpec, Extent, Offset, Selection, StructureStore,
    WorldHost,
};
use stencil_engine::{build_structure, capture, export_structure, BuildGuard, Placer};
use stencil_test_utils::{MockSelections, MockStore, MockWorld};

// ── Helpers ─────────────────────────────────────────────────────

fn placer() -> Placer {
    Placer::new(Arc::new(BuildGuard::new()), 4)
}

/// Seed the 2×1×1 source region from the worked example: STONE with no
/// payload at the min corner, a CHEST holding ItemA next to it.
fn seed_example(world: &mut MockWorld, min: BlockPos) {
    world.put(min, BlockSpec::plain("STONE"));
    world.put(
        BlockPos::new(min.x + 1, min.y, min.z),
        BlockSpec::container("CHEST", ["ItemA"]),
    );
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn export_then_build_recreates_the_example_structure() {
    let mut world = MockWorld::new();
    let source_min = BlockPos::new(0, 0, 0);
    seed_example(&mut world, source_min);

    let mut selections = MockSelections::new();
    let actor = ActorId(1);
    selections.set(
        actor,
        Selection {
            min: source_min,
            max: BlockPos::new(1, 0, 0),
        },
    );

    let mut store = MockStore::new();
    let summary = export_structure(&world, &selections, &mut store, actor, "shed").unwrap();
    assert_eq!(summary.dimensions, Extent::new(2, 1, 1).unwrap());
    assert_eq!(summary.block_count, 2);

    let mut placer = placer();
    let origin = BlockPos::new(10, 5, 10);
    let id = build_structure(&mut placer, &world, &store, "shed", origin).unwrap();
    let report = placer.run_to_completion(&mut world, id).unwrap();

    assert_eq!(report.placed, 2);
    assert!(!report.is_partial());

    let stone = world.get_block(BlockPos::new(10, 5, 10)).unwrap();
    assert_eq!(stone.material.as_str(), "STONE");
    assert!(stone.payload.is_none());

    let chest = world.get_block(BlockPos::new(11, 5, 10)).unwrap();
    assert_eq!(chest.material.as_str(), "CHEST");
    match chest.payload {
        Some(BlockPayload::Container(items)) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].0, "ItemA");
        }
        other => panic!("expected container contents, got {other:?}"),
    }

    // Applying finished, so nothing is left locked.
    assert_eq!(placer.guard().locked_count(), 0);
    assert_eq!(placer.active_sessions(), 0);
}

#[test]
fn replay_rebases_every_key_onto_the_new_origin() {
    let mut world = MockWorld::new();
    let source_min = BlockPos::new(-7, 40, 13);
    let source_max = BlockPos::new(-5, 42, 15);
    let occupied = [
        (Offset::new(0, 0, 0), BlockSpec::plain("STONE")),
        (Offset::new(2, 1, 0), BlockSpec::sign("OAK_SIGN", ["hey"])),
        (Offset::new(1, 2, 2), BlockSpec::container("CHEST", ["ItemB"])),
        (Offset::new(2, 2, 2), BlockSpec::plain("DIRT")),
    ];
    for (k, spec) in &occupied {
        world.put(source_min + *k, spec.clone());
    }

    let doc = capture(
        &world,
        &Selection {
            min: source_min,
            max: source_max,
        },
    );
    assert_eq!(doc.len(), occupied.len());

    let mut placer = placer();
    let origin = BlockPos::new(100, 0, -100);
    let id = placer.begin(&world, &doc, origin).unwrap();
    let report = placer.run_to_completion(&mut world, id).unwrap();
    assert_eq!(report.placed, occupied.len());

    // The cell captured at source_min + k now also exists at origin + k.
    for (k, spec) in &occupied {
        assert_eq!(world.get_block(origin + *k).as_ref(), Some(spec));
    }
    // Gaps stay empty: the document never writes absent keys.
    assert!(world.get_block(origin + Offset::new(1, 1, 1)).is_none());
}

#[test]
fn partial_failure_still_places_the_rest_and_releases_everything() {
    let mut world = MockWorld::new();
    seed_example(&mut world, BlockPos::new(0, 0, 0));

    let doc = capture(
        &world,
        &Selection {
            min: BlockPos::new(0, 0, 0),
            max: BlockPos::new(1, 0, 0),
        },
    );

    let origin = BlockPos::new(10, 5, 10);
    let rejected = BlockPos::new(11, 5, 10);
    world.fail_writes_at(rejected);

    let mut placer = placer();
    let id = placer.begin(&world, &doc, origin).unwrap();
    let report = placer.run_to_completion(&mut world, id).unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].pos, rejected);
    assert!(report.is_partial());

    assert!(world.get_block(BlockPos::new(10, 5, 10)).is_some());
    assert!(world.get_block(rejected).is_none());
    assert_eq!(placer.guard().locked_count(), 0);
}

#[test]
fn export_without_a_selection_fails_cleanly() {
    let world = MockWorld::new();
    let selections = MockSelections::new();
    let mut store = MockStore::new();

    let err = export_structure(&world, &selections, &mut store, ActorId(9), "nothing")
        .unwrap_err();
    assert_eq!(err.to_string(), "no active selection");
    assert!(store.raw("nothing").is_none());
}

#[test]
fn build_of_missing_or_corrupt_documents_fails_before_validation() {
    let mut world = MockWorld::new();
    let mut store = MockStore::new();
    let mut placer = placer();
    let origin = BlockPos::new(0, 0, 0);

    let err = build_structure(&mut placer, &world, &store, "ghost", origin).unwrap_err();
    assert_eq!(err.to_string(), "structure 'ghost' not found");

    store
        .save("corrupt", b"{\"dimensions\": [0,1,1], \"blocks\": {}}")
        .unwrap();
    let err = build_structure(&mut placer, &world, &store, "corrupt", origin).unwrap_err();
    assert!(err.to_string().contains("invalid dimensions"));

    // Neither attempt scheduled anything or touched the world.
    assert_eq!(placer.active_sessions(), 0);
    assert_eq!(world.write_count(), 0);
}
