//! Placement scheduling: validating a target volume, enqueueing
//! deferred cell writes, and applying them across ticks.
//!
//! Each replay invocation is one [`BuildSession`], a small state
//! machine (`Validating → Scheduling → Applying → Completed | Failed`)
//! owning an ordered queue of pending writes. The [`Placer`] drives
//! all in-flight sessions: [`begin`](Placer::begin) runs validation
//! and scheduling synchronously and returns the accept/reject outcome
//! immediately; [`tick`](Placer::tick) then applies a bounded number
//! of writes per session per call, interleaved with whatever else the
//! host does between ticks.
//!
//! Writes are deliberately not applied atomically in one pass. The
//! design accepts eventual consistency over the placement's duration
//! and defends against interference with the [`BuildGuard`] lock set
//! instead of requiring a multi-cell host transaction. There is no
//! cancellation of a scheduled session and no re-validation between
//! validation and applying — a cell occupied by an outside writer in
//! that window surfaces as a per-cell write rejection, nothing more.
//!
//! Calls that mutate the lock set (`begin`, `tick`) for placers
//! sharing one guard must come from a single thread, the way a host's
//! command dispatch does; the guard serializes individual lock
//! operations but not a whole validate-then-schedule sequence.

use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use stencil_core::{
    BlockPayload, BlockPos, BlockSpec, HostError, SessionId, StructureDoc, WorldHost,
};

use crate::guard::BuildGuard;

/// The replay was rejected during validation. Zero writes occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceError {
    /// A cell inside the target bounding box is not empty.
    AreaNotClear {
        /// The first occupied coordinate found.
        pos: BlockPos,
    },
    /// A cell inside the target bounding box is locked by another
    /// in-flight session. Overlapping replays are rejected here, never
    /// merged.
    LockConflict {
        /// The first locked coordinate found.
        pos: BlockPos,
    },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaNotClear { pos } => write!(f, "target area not clear at {pos}"),
            Self::LockConflict { pos } => {
                write!(f, "target area overlaps an in-flight placement at {pos}")
            }
        }
    }
}

impl Error for PlaceError {}

/// An individual deferred write was rejected by the host.
///
/// Non-fatal to the session: the coordinate is logged and released and
/// the remaining writes continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellWriteError {
    /// The coordinate whose write was rejected.
    pub pos: BlockPos,
    /// The host's reason.
    pub reason: String,
}

impl fmt::Display for CellWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write rejected at {}: {}", self.pos, self.reason)
    }
}

impl Error for CellWriteError {}

/// Lifecycle of one placement invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Checking that the target bounding box is clear and unlocked.
    Validating,
    /// Registering coordinates with the guard and enqueueing writes.
    Scheduling,
    /// Deferred writes are being applied across ticks.
    Applying,
    /// All scheduled writes ran (some may have been rejected — see
    /// [`PlacementReport::is_partial`]).
    Completed,
    /// Validation rejected the replay; nothing was written.
    Failed,
}

/// One scheduled cell write.
#[derive(Debug)]
struct PendingWrite {
    pos: BlockPos,
    spec: BlockSpec,
}

/// Final accounting for a finished session.
#[derive(Clone, Debug)]
pub struct PlacementReport {
    /// The finished session.
    pub session: SessionId,
    /// The replay's placement anchor.
    pub origin: BlockPos,
    /// Number of cells written successfully.
    pub placed: usize,
    /// Per-cell failures, in the order they occurred.
    pub failures: Vec<CellWriteError>,
}

impl PlacementReport {
    /// Whether any cell failed while the rest of the session went on.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// An in-flight replay: the deferred write queue plus the set of
/// absolute coordinates scheduled but not yet applied.
#[derive(Debug)]
pub struct BuildSession {
    id: SessionId,
    origin: BlockPos,
    state: SessionState,
    queue: VecDeque<PendingWrite>,
    pending: HashSet<BlockPos>,
    placed: usize,
    failures: Vec<CellWriteError>,
}

impl BuildSession {
    fn new(origin: BlockPos) -> Self {
        Self {
            id: SessionId::next(),
            origin,
            state: SessionState::Validating,
            queue: VecDeque::new(),
            pending: HashSet::new(),
            placed: 0,
            failures: Vec::new(),
        }
    }

    /// This session's unique ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The replay's placement anchor.
    pub fn origin(&self) -> BlockPos {
        self.origin
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of writes scheduled but not yet applied.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply the next deferred write, releasing its coordinate.
    ///
    /// Returns `false` if nothing is left to apply. A host rejection
    /// is recorded and logged; it never aborts the rest of the queue.
    fn step(&mut self, host: &mut dyn WorldHost, guard: &BuildGuard) -> bool {
        let Some(write) = self.queue.pop_front() else {
            return false;
        };

        match apply_write(host, &write) {
            Ok(()) => self.placed += 1,
            Err(e) => {
                log::warn!("session {}: write rejected at {}: {}", self.id, write.pos, e.reason);
                self.failures.push(CellWriteError {
                    pos: write.pos,
                    reason: e.reason,
                });
            }
        }

        // Release exactly when the write completes, success or not.
        guard.release(write.pos);
        self.pending.remove(&write.pos);
        if self.pending.is_empty() {
            self.state = SessionState::Completed;
        }
        true
    }

    fn take_report(&mut self) -> PlacementReport {
        PlacementReport {
            session: self.id,
            origin: self.origin,
            placed: self.placed,
            failures: std::mem::take(&mut self.failures),
        }
    }
}

/// Write one cell: material first, then its payload if any.
///
/// Sign text is truncated to the host's line limit — extra lines are
/// dropped, not an error. Container contents replace whatever the
/// cell held.
fn apply_write(host: &mut dyn WorldHost, write: &PendingWrite) -> Result<(), HostError> {
    host.set_block(write.pos, &write.spec.material)?;
    match &write.spec.payload {
        Some(BlockPayload::SignText(lines)) => {
            let keep = lines.len().min(host.sign_line_limit());
            host.set_sign_text(write.pos, &lines[..keep])?;
        }
        Some(BlockPayload::Container(items)) => {
            host.set_container(write.pos, items)?;
        }
        None => {}
    }
    Ok(())
}

/// Driver for all in-flight placement sessions sharing one guard.
pub struct Placer {
    guard: Arc<BuildGuard>,
    sessions: Vec<BuildSession>,
    writes_per_tick: usize,
}

impl Placer {
    /// A placer applying at most `writes_per_tick` writes per session
    /// on each [`tick`](Placer::tick).
    ///
    /// # Panics
    ///
    /// Panics if `writes_per_tick` is zero.
    pub fn new(guard: Arc<BuildGuard>, writes_per_tick: usize) -> Self {
        assert!(writes_per_tick > 0, "writes_per_tick must be at least 1");
        Self {
            guard,
            sessions: Vec::new(),
            writes_per_tick,
        }
    }

    /// The shared lock set this placer schedules against.
    pub fn guard(&self) -> &Arc<BuildGuard> {
        &self.guard
    }

    /// Number of sessions currently applying writes.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Inspect an in-flight session.
    pub fn session(&self, id: SessionId) -> Option<&BuildSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Accept or reject a replay of `doc` anchored at `origin`.
    ///
    /// Validation covers the full target bounding box, not just the
    /// document's occupied keys — leftover clutter inside gaps the
    /// document considers empty also rejects the replay. On acceptance
    /// every occupied cell is locked and enqueued, and the session
    /// moves to `Applying`; drive it with [`tick`](Placer::tick).
    ///
    /// On rejection nothing is written and nothing is locked.
    pub fn begin(
        &mut self,
        host: &impl WorldHost,
        doc: &StructureDoc,
        origin: BlockPos,
    ) -> Result<SessionId, PlaceError> {
        let mut session = BuildSession::new(origin);

        for offset in doc.dimensions().offsets() {
            let pos = origin + offset;
            if self.guard.is_locked(pos) {
                session.state = SessionState::Failed;
                return Err(PlaceError::LockConflict { pos });
            }
            if host.get_block(pos).is_some() {
                session.state = SessionState::Failed;
                return Err(PlaceError::AreaNotClear { pos });
            }
        }

        session.state = SessionState::Scheduling;
        for (offset, spec) in doc.iter() {
            let pos = origin + offset;
            self.guard.acquire(pos, session.id);
            session.pending.insert(pos);
            session.queue.push_back(PendingWrite {
                pos,
                spec: spec.clone(),
            });
        }

        // A document with no occupied cells has nothing to apply.
        session.state = if session.pending.is_empty() {
            SessionState::Completed
        } else {
            SessionState::Applying
        };
        let id = session.id;
        log::info!(
            "session {id}: scheduled {} writes anchored at {origin}",
            session.queue.len()
        );
        self.sessions.push(session);
        Ok(id)
    }

    /// Apply up to `writes_per_tick` writes for every active session.
    ///
    /// Returns the reports of sessions that finished during this tick.
    pub fn tick(&mut self, host: &mut impl WorldHost) -> Vec<PlacementReport> {
        for session in &mut self.sessions {
            for _ in 0..self.writes_per_tick {
                if !session.step(host, &self.guard) {
                    break;
                }
            }
        }
        self.collect_finished()
    }

    /// Drive one session until it completes, ignoring the per-tick
    /// write budget. Returns `None` for an unknown session ID.
    pub fn run_to_completion(
        &mut self,
        host: &mut impl WorldHost,
        id: SessionId,
    ) -> Option<PlacementReport> {
        self.sessions.iter_mut().find(|s| s.id == id)?;
        loop {
            let session = self
                .sessions
                .iter_mut()
                .find(|s| s.id == id)
                .expect("session present until collected");
            if !session.step(host, &self.guard) {
                break;
            }
        }
        self.collect_finished()
            .into_iter()
            .find(|r| r.session == id)
    }

    fn collect_finished(&mut self) -> Vec<PlacementReport> {
        let mut reports = Vec::new();
        self.sessions.retain_mut(|s| {
            if s.state == SessionState::Completed {
                reports.push(s.take_report());
                false
            } else {
                true
            }
        });
        reports
    }
}
