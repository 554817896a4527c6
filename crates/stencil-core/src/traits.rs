//! Collaborator traits: the boundary between the core pipeline and the
//! host environment, selection tool, and storage.
//!
//! The core never talks to a live world directly — capture and replay
//! are written against these traits, which keeps the pipeline
//! synchronous, deterministic, and testable against mocks.

use crate::block::{BlockSpec, ItemStack, MaterialId};
use crate::error::{HostError, SelectionError, StoreError};
use crate::id::{ActorId, BlockPos};

/// An absolute axis-aligned region, both corners inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Minimum corner (inclusive).
    pub min: BlockPos,
    /// Maximum corner (inclusive).
    pub max: BlockPos,
}

/// Read/write access to cells of one world.
///
/// `None` from [`get_block`](WorldHost::get_block) is the "empty"
/// sentinel (air): capture skips such cells and the area-clear check
/// requires them. One implementor instance corresponds to one world.
pub trait WorldHost {
    /// The cell at `pos`, or `None` for an empty cell.
    ///
    /// A returned spec carries at most one payload variant; a host cell
    /// cannot report both sign text and container contents.
    fn get_block(&self, pos: BlockPos) -> Option<BlockSpec>;

    /// Set the cell's material.
    fn set_block(&mut self, pos: BlockPos, material: &MaterialId) -> Result<(), HostError>;

    /// Write display-text lines, in order, to the cell's text surface.
    ///
    /// Callers truncate to [`sign_line_limit`](WorldHost::sign_line_limit)
    /// before calling; implementors may assume `lines` fits.
    fn set_sign_text(&mut self, pos: BlockPos, lines: &[String]) -> Result<(), HostError>;

    /// Replace the cell's container contents, in order.
    fn set_container(&mut self, pos: BlockPos, items: &[ItemStack]) -> Result<(), HostError>;

    /// How many text lines the host's sign surface supports.
    fn sign_line_limit(&self) -> usize {
        crate::block::MAX_SIGN_LINES
    }
}

/// Supplies the captured volume's bounds (the external selection tool).
pub trait SelectionProvider {
    /// The actor's active selection.
    fn active_selection(&self, actor: ActorId) -> Result<Selection, SelectionError>;
}

/// Opaque byte sink/source keyed by structure name.
pub trait StructureStore {
    /// Persist `bytes` under `name`, replacing any previous content.
    fn save(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Retrieve the bytes stored under `name`.
    fn load(&self, name: &str) -> Result<Vec<u8>, StoreError>;
}
