//! Error types shared across the Stencil workspace.
//!
//! Crate-local errors (codec format errors, placement errors) live in
//! their own crates; this module holds the ones that cross the
//! collaborator boundaries in `traits.rs`.

use std::error::Error;
use std::fmt;

use crate::id::{Extent, Offset};

/// The capture region could not be resolved.
///
/// Fatal to the capture call; no partial capture is performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The actor has no active selection.
    NoActiveSelection,
    /// The selection provider failed to resolve the region.
    Unresolved {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveSelection => write!(f, "no active selection"),
            Self::Unresolved { reason } => write!(f, "selection not resolved: {reason}"),
        }
    }
}

impl Error for SelectionError {}

/// The host environment rejected a cell write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError {
    /// Human-readable reason reported by the host.
    pub reason: String,
}

impl HostError {
    /// Construct a host rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host rejected write: {}", self.reason)
    }
}

impl Error for HostError {}

/// A structure document invariant would be violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocError {
    /// The offset lies outside the document's bounding box.
    OffsetOutOfRange {
        /// The offending offset.
        offset: Offset,
        /// The document's dimensions.
        dimensions: Extent,
    },
    /// The offset is already recorded in the document.
    DuplicateKey {
        /// The offending offset.
        offset: Offset,
    },
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange { offset, dimensions } => {
                write!(f, "offset {offset} outside document bounds {dimensions}")
            }
            Self::DuplicateKey { offset } => {
                write!(f, "duplicate document key {offset}")
            }
        }
    }
}

impl Error for DocError {}

/// Failure from the structure storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No structure is stored under the given name.
    NotFound {
        /// The requested structure name.
        name: String,
    },
    /// The underlying byte sink/source failed.
    Io {
        /// Human-readable description of the failure.
        detail: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "structure '{name}' not found"),
            Self::Io { detail } => write!(f, "storage failure: {detail}"),
        }
    }
}

impl Error for StoreError {}
