//! Stencil: capture a volume of typed cells, carry it as a portable
//! document, and replay it elsewhere without outside interference.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Stencil sub-crates. For most users, adding `stencil` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use stencil::prelude::*;
//! use stencil_test_utils::MockWorld;
//!
//! // A world with two interesting cells.
//! let mut world = MockWorld::new();
//! world.put(BlockPos::new(0, 0, 0), BlockSpec::plain("STONE"));
//! world.put(BlockPos::new(1, 0, 0), BlockSpec::container("CHEST", ["ItemA"]));
//!
//! // Capture them, round-trip through the wire form, replay elsewhere.
//! let region = Selection {
//!     min: BlockPos::new(0, 0, 0),
//!     max: BlockPos::new(1, 0, 0),
//! };
//! let doc = stencil::engine::capture(&world, &region);
//! let bytes = stencil::codec::encode(&doc).unwrap();
//! let doc = stencil::codec::decode(&bytes).unwrap();
//!
//! let mut placer = Placer::new(Arc::new(BuildGuard::new()), 4);
//! let id = placer.begin(&world, &doc, BlockPos::new(10, 5, 10)).unwrap();
//! let report = placer.run_to_completion(&mut world, id).unwrap();
//! assert_eq!(report.placed, 2);
//! assert!(world.get_block(BlockPos::new(11, 5, 10)).is_some());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stencil-core` | Coordinates, the document model, errors, collaborator traits |
//! | [`codec`] | `stencil-codec` | Document wire encoding and validating decode |
//! | [`engine`] | `stencil-engine` | Capture, placement scheduling, concurrency guard, mutation bus |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`stencil-core`).
pub use stencil_core as types;

/// Document wire codec (`stencil-codec`).
pub use stencil_codec as codec;

/// Capture, placement, and guarding (`stencil-engine`).
pub use stencil_engine as engine;

/// The commonly-used subset of the Stencil API.
pub mod prelude {
    pub use stencil_core::{
        ActorId, BlockPayload, BlockPos, BlockSpec, Extent, ItemStack, MaterialId, Offset,
        Selection, SelectionProvider, SessionId, StructureDoc, StructureStore, WorldHost,
    };

    pub use stencil_codec::FormatError;

    pub use stencil_engine::{
        build_structure, capture, export_structure, BuildGuard, MutationBus, MutationVerdict,
        PlaceError, PlacementReport, Placer, SessionState,
    };
}
