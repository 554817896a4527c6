//! Mock collaborators for Stencil development and testing.
//!
//! Provides in-memory implementations of the core traits
//! ([`WorldHost`], [`SelectionProvider`], [`StructureStore`]) so the
//! capture and placement pipelines can be exercised without a live
//! host environment.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::{HashMap, HashSet};

use stencil_core::{
    ActorId, BlockPayload, BlockPos, BlockSpec, HostError, ItemStack, MaterialId, Selection,
    SelectionError, SelectionProvider, StoreError, StructureStore, WorldHost, MAX_SIGN_LINES,
};

/// In-memory [`WorldHost`] backed by a sparse cell map.
///
/// Absent entries are empty cells. Writes can be failure-injected per
/// coordinate with [`fail_writes_at`](MockWorld::fail_writes_at), and
/// the sign line limit is configurable for truncation tests.
#[derive(Debug, Default)]
pub struct MockWorld {
    cells: HashMap<BlockPos, BlockSpec>,
    fail_at: HashSet<BlockPos>,
    sign_line_limit: Option<usize>,
    writes: usize,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a cell.
    pub fn put(&mut self, pos: BlockPos, spec: BlockSpec) {
        self.cells.insert(pos, spec);
    }

    /// Make every write at `pos` fail with a host rejection.
    pub fn fail_writes_at(&mut self, pos: BlockPos) {
        self.fail_at.insert(pos);
    }

    /// Override the advertised sign line limit.
    pub fn set_sign_line_limit(&mut self, limit: usize) {
        self.sign_line_limit = Some(limit);
    }

    /// Total number of successful writes, for no-mutation assertions.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_writable(&self, pos: BlockPos) -> Result<(), HostError> {
        if self.fail_at.contains(&pos) {
            return Err(HostError::new(format!("injected failure at {pos}")));
        }
        Ok(())
    }
}

impl WorldHost for MockWorld {
    fn get_block(&self, pos: BlockPos) -> Option<BlockSpec> {
        self.cells.get(&pos).cloned()
    }

    fn set_block(&mut self, pos: BlockPos, material: &MaterialId) -> Result<(), HostError> {
        self.check_writable(pos)?;
        self.cells.insert(
            pos,
            BlockSpec {
                material: material.clone(),
                payload: None,
            },
        );
        self.writes += 1;
        Ok(())
    }

    fn set_sign_text(&mut self, pos: BlockPos, lines: &[String]) -> Result<(), HostError> {
        self.check_writable(pos)?;
        let cell = self
            .cells
            .get_mut(&pos)
            .ok_or_else(|| HostError::new(format!("no cell at {pos}")))?;
        cell.payload = Some(BlockPayload::SignText(lines.iter().cloned().collect()));
        self.writes += 1;
        Ok(())
    }

    fn set_container(&mut self, pos: BlockPos, items: &[ItemStack]) -> Result<(), HostError> {
        self.check_writable(pos)?;
        let cell = self
            .cells
            .get_mut(&pos)
            .ok_or_else(|| HostError::new(format!("no cell at {pos}")))?;
        cell.payload = Some(BlockPayload::Container(items.to_vec()));
        self.writes += 1;
        Ok(())
    }

    fn sign_line_limit(&self) -> usize {
        self.sign_line_limit.unwrap_or(MAX_SIGN_LINES)
    }
}

/// [`SelectionProvider`] serving fixed per-actor selections.
#[derive(Debug, Default)]
pub struct MockSelections {
    selections: HashMap<ActorId, Selection>,
}

impl MockSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `actor` an active selection.
    pub fn set(&mut self, actor: ActorId, selection: Selection) {
        self.selections.insert(actor, selection);
    }
}

impl SelectionProvider for MockSelections {
    fn active_selection(&self, actor: ActorId) -> Result<Selection, SelectionError> {
        self.selections
            .get(&actor)
            .copied()
            .ok_or(SelectionError::NoActiveSelection)
    }
}

/// In-memory [`StructureStore`] keyed by name.
#[derive(Debug, Default)]
pub struct MockStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored bytes, for assertions on the wire form.
    pub fn raw(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }
}

impl StructureStore for MockStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }
}
