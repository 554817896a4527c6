//! Capture, placement scheduling, and concurrency guarding.
//!
//! The pipeline this crate implements: an external selection bounds a
//! volume, [`capture`](capture::capture) scans it into a
//! [`StructureDoc`](stencil_core::StructureDoc), the codec persists it,
//! and a [`Placer`](session::Placer) later replays it against a new
//! origin while the [`BuildGuard`](guard::BuildGuard) keeps outside
//! writers away from the cells still being placed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bus;
pub mod capture;
pub mod guard;
pub mod pipeline;
pub mod session;

pub use bus::{MutationBus, MutationBusHandle, SubmitError};
pub use capture::capture;
pub use guard::{BuildGuard, MutationVerdict};
pub use pipeline::{build_structure, export_structure, BuildError, ExportError, ExportSummary};
pub use session::{
    BuildSession, CellWriteError, PlaceError, PlacementReport, Placer, SessionState,
};
