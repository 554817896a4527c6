//! Read-only capture of a bounded region into a structure document.

use stencil_core::{Extent, Selection, StructureDoc, WorldHost};

/// Scan `region` and produce a structure document.
///
/// The document is anchored at the region's minimum corner: dimensions
/// are `max - min + 1` componentwise and every recorded key is
/// `abs - min`, which keeps all keys inside `[0, dimensions)` by
/// construction. Empty cells (the host reports `None`) are skipped and
/// represented by key absence.
///
/// Capture performs no writes and takes no locks. The result is
/// independent of scan order — each cell's key and spec depend only on
/// that cell and the anchor.
pub fn capture(host: &impl WorldHost, region: &Selection) -> StructureDoc {
    let dims = Extent::of_corners(region.min, region.max);
    let mut doc = StructureDoc::new(dims);

    for offset in dims.offsets() {
        let abs = region.min + offset;
        if let Some(spec) = host.get_block(abs) {
            doc.insert(offset, spec)
                .expect("scan offsets are in range and visited once");
        }
    }

    doc
}
