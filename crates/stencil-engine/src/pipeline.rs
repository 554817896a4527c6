//! End-to-end pipeline entry points: `export <name>` and `build <name>`.
//!
//! These compose the collaborators the way a host's command dispatch
//! does — the user-supplied structure name doubles as the storage key.
//! Permission checks and usage messaging belong to the dispatch layer,
//! not here.

use std::error::Error;
use std::fmt;

use stencil_codec::FormatError;
use stencil_core::{
    ActorId, BlockPos, Extent, SelectionError, SelectionProvider, SessionId, StoreError,
    StructureStore, WorldHost,
};

use crate::capture::capture;
use crate::session::{PlaceError, Placer};

/// What an export produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Storage key the document was saved under.
    pub name: String,
    /// Captured bounding-box dimensions.
    pub dimensions: Extent,
    /// Number of non-empty cells captured.
    pub block_count: usize,
}

/// Failure of the capture → encode → store pipeline.
#[derive(Debug)]
pub enum ExportError {
    /// The capture region could not be resolved.
    Selection(SelectionError),
    /// The captured document failed to serialize.
    Format(FormatError),
    /// Storage rejected the save.
    Store(StoreError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection(e) => write!(f, "{e}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Selection(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Store(e) => Some(e),
        }
    }
}

/// Failure of the load → decode → validate/schedule pipeline.
#[derive(Debug)]
pub enum BuildError {
    /// Storage could not produce the named document.
    Store(StoreError),
    /// The stored bytes are not a valid document.
    Format(FormatError),
    /// Validation rejected the replay.
    Place(PlaceError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::Place(e) => write!(f, "{e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Place(e) => Some(e),
        }
    }
}

/// Capture the actor's active selection and persist it under `name`.
///
/// All-or-nothing: a failure at any stage leaves storage untouched and
/// performs no partial capture.
pub fn export_structure(
    host: &impl WorldHost,
    selections: &impl SelectionProvider,
    store: &mut impl StructureStore,
    actor: ActorId,
    name: &str,
) -> Result<ExportSummary, ExportError> {
    let region = selections
        .active_selection(actor)
        .map_err(ExportError::Selection)?;
    let doc = capture(host, &region);
    let bytes = stencil_codec::encode(&doc).map_err(ExportError::Format)?;
    store.save(name, &bytes).map_err(ExportError::Store)?;

    log::info!(
        "exported structure '{name}': {} cells in {}",
        doc.len(),
        doc.dimensions()
    );
    Ok(ExportSummary {
        name: name.to_string(),
        dimensions: doc.dimensions(),
        block_count: doc.len(),
    })
}

/// Load the document stored under `name` and schedule its replay
/// anchored at `origin`.
///
/// Returns synchronously once validation accepts or rejects the
/// replay; the cell writes themselves are applied asynchronously by
/// [`Placer::tick`].
pub fn build_structure(
    placer: &mut Placer,
    host: &impl WorldHost,
    store: &impl StructureStore,
    name: &str,
    origin: BlockPos,
) -> Result<SessionId, BuildError> {
    let bytes = store.load(name).map_err(BuildError::Store)?;
    let doc = stencil_codec::decode(&bytes).map_err(BuildError::Format)?;
    placer.begin(host, &doc, origin).map_err(BuildError::Place)
}
