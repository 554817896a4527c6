//! The lock set protecting in-flight placements from outside writers.
//!
//! [`BuildGuard`] owns the process-wide mapping from absolute
//! coordinate to the placement session that currently owns it. The
//! interior mutex is the single serialization point for the lock set:
//! every acquire, release, and verdict goes through it, which is what
//! upholds the "at most one owner per coordinate" invariant under
//! concurrent access.
//!
//! The guard is an explicit shared structure — callers hold it in an
//! `Arc` and hand it to the placer and the mutation bus. There is no
//! hidden global.

use std::collections::HashMap;
use std::sync::Mutex;

use stencil_core::{BlockPos, SessionId};

/// Outcome of an external mutation attempt against the lock set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationVerdict {
    /// The coordinate is unlocked; the guard has no opinion.
    Allowed,
    /// The coordinate is owned by an in-flight placement; the attempt
    /// is rejected.
    Denied {
        /// The owning session.
        owner: SessionId,
    },
}

/// Mutex-guarded map of locked coordinates to owning sessions.
#[derive(Debug, Default)]
pub struct BuildGuard {
    locked: Mutex<HashMap<BlockPos, SessionId>>,
}

impl BuildGuard {
    /// An empty guard with no locked coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `pos` for `session`.
    ///
    /// Re-acquiring a coordinate the same session already holds is a
    /// no-op.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is locked by a different session. Disjoint
    /// scheduling is the placer's contract — it validates overlap
    /// before acquiring, so a conflicting acquire is a caller bug, not
    /// a recoverable runtime failure.
    pub fn acquire(&self, pos: BlockPos, session: SessionId) {
        let mut locked = self.locked.lock().unwrap();
        let prev = locked.insert(pos, session);
        assert!(
            prev.is_none() || prev == Some(session),
            "coordinate {pos} already locked by session {} (acquiring for {session})",
            prev.expect("checked above"),
        );
    }

    /// Unlock `pos`.
    ///
    /// Idempotent: releasing a coordinate that is not locked is a
    /// no-op, which tolerates duplicate completion signals.
    pub fn release(&self, pos: BlockPos) {
        self.locked.lock().unwrap().remove(&pos);
    }

    /// The session owning `pos`, if any.
    pub fn owner(&self, pos: BlockPos) -> Option<SessionId> {
        self.locked.lock().unwrap().get(&pos).copied()
    }

    /// Whether `pos` is currently locked.
    pub fn is_locked(&self, pos: BlockPos) -> bool {
        self.owner(pos).is_some()
    }

    /// Number of currently locked coordinates.
    pub fn locked_count(&self) -> usize {
        self.locked.lock().unwrap().len()
    }

    /// Judge an external mutation attempt at `pos`.
    ///
    /// Denials are logged; attempts against unlocked coordinates pass
    /// through unremarked.
    pub fn mutation_verdict(&self, pos: BlockPos) -> MutationVerdict {
        match self.owner(pos) {
            Some(owner) => {
                log::debug!("denied external mutation at {pos}: locked by session {owner}");
                MutationVerdict::Denied { owner }
            }
            None => MutationVerdict::Allowed,
        }
    }
}
