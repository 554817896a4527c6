//! Core types and collaborator traits for the Stencil structure toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the structure document data model, coordinate arithmetic, the error
//! types that cross collaborator boundaries, and the traits the capture
//! and placement pipelines are written against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod doc;
pub mod error;
pub mod id;
pub mod traits;

pub use block::{BlockPayload, BlockSpec, ItemStack, MaterialId, SignLines, MAX_SIGN_LINES};
pub use doc::StructureDoc;
pub use error::{DocError, HostError, SelectionError, StoreError};
pub use id::{ActorId, BlockPos, Extent, Offset, SessionId};
pub use traits::{Selection, SelectionProvider, StructureStore, WorldHost};
