//! Structure document wire codec.
//!
//! Maps a [`StructureDoc`] to and from its serialized form: a JSON
//! object with a 3-integer `dimensions` array and a `blocks` mapping of
//! `"dx,dy,dz"` keys to `{material, lines?, inventory?}` records.
//!
//! Encoding is deterministic — keys are emitted in lexicographic order
//! regardless of the document's iteration order — and round-trips
//! through [`decode`]. Decoding is all-or-nothing: the first invariant
//! violation aborts with a [`FormatError`] and no partial document is
//! returned.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stencil_core::{
    BlockPayload, BlockSpec, Extent, ItemStack, MaterialId, Offset, StructureDoc, MAX_SIGN_LINES,
};

mod error;

pub use error::FormatError;

/// Wire form of a whole document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireDoc {
    /// Width, height, length. Read as i64 so that zero and negative
    /// values can be rejected with a precise error rather than a serde
    /// type mismatch.
    dimensions: [i64; 3],
    blocks: BTreeMap<String, WireBlock>,
}

/// Wire form of one cell record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireBlock {
    material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inventory: Option<Vec<String>>,
}

/// Serialize a document to its wire form.
///
/// Deterministic with respect to dimensions and per-key structure:
/// two documents with equal contents encode to identical bytes, no
/// matter what order their cells were inserted in.
pub fn encode(doc: &StructureDoc) -> Result<Vec<u8>, FormatError> {
    let dims = doc.dimensions();
    let blocks: BTreeMap<String, WireBlock> = doc
        .iter()
        .map(|(offset, spec)| {
            let (lines, inventory) = match &spec.payload {
                None => (None, None),
                Some(BlockPayload::SignText(lines)) => (Some(lines.to_vec()), None),
                Some(BlockPayload::Container(items)) => (
                    None,
                    Some(items.iter().map(|i| i.0.clone()).collect()),
                ),
            };
            (
                offset.to_string(),
                WireBlock {
                    material: spec.material.0.clone(),
                    lines,
                    inventory,
                },
            )
        })
        .collect();

    let wire = WireDoc {
        dimensions: [
            i64::from(dims.width()),
            i64::from(dims.height()),
            i64::from(dims.length()),
        ],
        blocks,
    };
    Ok(serde_json::to_vec_pretty(&wire)?)
}

/// Deserialize and validate a document from its wire form.
///
/// Rejects syntactically malformed input, unknown record fields, zero
/// or negative dimensions, keys that are not exact `"dx,dy,dz"`
/// triples, out-of-range keys, records carrying both payload tags,
/// oversized sign text, and malformed material tokens.
pub fn decode(bytes: &[u8]) -> Result<StructureDoc, FormatError> {
    let wire: WireDoc = serde_json::from_slice(bytes)?;

    let [w, h, l] = wire.dimensions;
    let dims = in_extent_range(w)
        .zip(in_extent_range(h))
        .zip(in_extent_range(l))
        .and_then(|((w, h), l)| Extent::new(w, h, l))
        .ok_or(FormatError::InvalidDimensions {
            dimensions: wire.dimensions,
        })?;

    let mut doc = StructureDoc::new(dims);
    for (key, block) in wire.blocks {
        let offset: Offset = key.parse().map_err(|_| FormatError::BadBlockKey {
            key: key.clone(),
        })?;

        if !MaterialId::is_valid_token(&block.material) {
            return Err(FormatError::BadMaterial {
                token: block.material,
            });
        }

        let payload = match (block.lines, block.inventory) {
            (Some(_), Some(_)) => {
                return Err(FormatError::ConflictingPayload { key });
            }
            (Some(lines), None) => {
                if lines.len() > MAX_SIGN_LINES {
                    return Err(FormatError::TooManyLines {
                        key,
                        count: lines.len(),
                    });
                }
                Some(BlockPayload::SignText(lines.into_iter().collect()))
            }
            (None, Some(items)) => Some(BlockPayload::Container(
                items.into_iter().map(ItemStack).collect(),
            )),
            (None, None) => None,
        };

        let spec = BlockSpec {
            material: MaterialId(block.material),
            payload,
        };
        doc.insert(offset, spec).map_err(|e| match e {
            stencil_core::DocError::OffsetOutOfRange { offset, dimensions } => {
                FormatError::KeyOutOfRange { offset, dimensions }
            }
            // Distinct key strings can parse to the same offset
            // (e.g. "0,0,0" and "00,0,0").
            stencil_core::DocError::DuplicateKey { offset } => FormatError::DuplicateKey {
                key: offset.to_string(),
            },
        })?;
    }

    Ok(doc)
}

/// A wire dimension value, if it fits a valid extent component.
fn in_extent_range(v: i64) -> Option<u32> {
    u32::try_from(v).ok().filter(|&v| v >= 1)
}
