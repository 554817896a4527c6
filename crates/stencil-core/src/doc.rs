//! The structure document: a portable, serializable captured volume.

use indexmap::IndexMap;

use crate::block::BlockSpec;
use crate::error::DocError;
use crate::id::{Extent, Offset};

/// A captured volume: bounding-box dimensions plus a sparse mapping
/// from in-range offsets to cell contents.
///
/// An offset absent from the mapping is an empty cell and is never
/// written during replay. Keys are unique and every component lies in
/// `[0, dimension)` — both enforced at [`insert`](StructureDoc::insert),
/// so a `StructureDoc` in hand always satisfies the invariants.
///
/// Iteration order is insertion order (capture scan order, or decoded
/// key order); no consumer may rely on it for semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureDoc {
    dimensions: Extent,
    blocks: IndexMap<Offset, BlockSpec>,
}

impl StructureDoc {
    /// An empty document with the given bounding-box dimensions.
    pub fn new(dimensions: Extent) -> Self {
        Self {
            dimensions,
            blocks: IndexMap::new(),
        }
    }

    /// Bounding-box dimensions.
    pub fn dimensions(&self) -> Extent {
        self.dimensions
    }

    /// Record a cell at `offset`.
    ///
    /// Rejects offsets outside the bounding box and offsets already
    /// present — a document never holds two entries for one key.
    pub fn insert(&mut self, offset: Offset, spec: BlockSpec) -> Result<(), DocError> {
        if !self.dimensions.contains(offset) {
            return Err(DocError::OffsetOutOfRange {
                offset,
                dimensions: self.dimensions,
            });
        }
        if self.blocks.contains_key(&offset) {
            return Err(DocError::DuplicateKey { offset });
        }
        self.blocks.insert(offset, spec);
        Ok(())
    }

    /// The cell at `offset`, if one was recorded.
    pub fn get(&self, offset: Offset) -> Option<&BlockSpec> {
        self.blocks.get(&offset)
    }

    /// Iterate recorded cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Offset, &BlockSpec)> {
        self.blocks.iter().map(|(&k, v)| (k, v))
    }

    /// Number of recorded (non-empty) cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no cells were recorded.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_doc(w: u32, h: u32, l: u32) -> StructureDoc {
        StructureDoc::new(Extent::new(w, h, l).unwrap())
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut doc = unit_doc(2, 1, 1);
        assert!(doc.insert(Offset::new(1, 0, 0), BlockSpec::plain("STONE")).is_ok());
        let err = doc
            .insert(Offset::new(2, 0, 0), BlockSpec::plain("STONE"))
            .unwrap_err();
        assert!(matches!(err, DocError::OffsetOutOfRange { .. }));
        let err = doc
            .insert(Offset::new(0, -1, 0), BlockSpec::plain("STONE"))
            .unwrap_err();
        assert!(matches!(err, DocError::OffsetOutOfRange { .. }));
    }

    #[test]
    fn insert_rejects_duplicate_keys() {
        let mut doc = unit_doc(1, 1, 1);
        doc.insert(Offset::new(0, 0, 0), BlockSpec::plain("STONE"))
            .unwrap();
        let err = doc
            .insert(Offset::new(0, 0, 0), BlockSpec::plain("DIRT"))
            .unwrap_err();
        assert!(matches!(err, DocError::DuplicateKey { .. }));
        // First entry survives.
        assert_eq!(doc.get(Offset::new(0, 0, 0)).unwrap().material.as_str(), "STONE");
    }

    #[test]
    fn absent_key_means_empty_cell() {
        let doc = unit_doc(3, 3, 3);
        assert!(doc.get(Offset::new(1, 1, 1)).is_none());
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }
}
