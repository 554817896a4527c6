//! Event-bus boundary for external mutation attempts.
//!
//! Outside writers (the host's event dispatch) announce "a mutation
//! was attempted at coordinate C" through a [`MutationBusHandle`] and
//! receive the guard's verdict on a per-attempt reply channel. The
//! host's tick loop pumps [`MutationBus::drain`], which answers every
//! queued attempt from the lock set.
//!
//! Submission is non-blocking on the attempt channel; replies arrive
//! once the bus is drained. A full bus rejects further attempts as
//! allowed-by-default is never assumed — the submitter gets an
//! explicit [`SubmitError`] instead.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use stencil_core::BlockPos;

use crate::guard::{BuildGuard, MutationVerdict};

/// One announced mutation attempt, paired with its reply channel.
struct MutationAttempt {
    pos: BlockPos,
    reply: Sender<MutationVerdict>,
}

/// The attempt could not be queued on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The bus is at capacity.
    BusFull,
    /// The bus was dropped.
    Disconnected,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BusFull => write!(f, "mutation bus is full"),
            Self::Disconnected => write!(f, "mutation bus is gone"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Submission side of the bus, handed to external mutation sources.
///
/// Cheap to clone; all clones feed the same bus.
#[derive(Clone)]
pub struct MutationBusHandle {
    tx: Sender<MutationAttempt>,
}

impl MutationBusHandle {
    /// Announce a mutation attempt at `pos`.
    ///
    /// Returns the receiver on which the verdict will arrive once the
    /// bus is drained.
    pub fn submit(&self, pos: BlockPos) -> Result<Receiver<MutationVerdict>, SubmitError> {
        let (reply_tx, reply_rx) = bounded(1);
        let attempt = MutationAttempt {
            pos,
            reply: reply_tx,
        };
        self.tx.try_send(attempt).map_err(|e| match e {
            TrySendError::Full(_) => SubmitError::BusFull,
            TrySendError::Disconnected(_) => SubmitError::Disconnected,
        })?;
        Ok(reply_rx)
    }
}

/// Receiving side of the bus, pumped by the host's tick loop.
pub struct MutationBus {
    tx: Sender<MutationAttempt>,
    rx: Receiver<MutationAttempt>,
}

impl MutationBus {
    /// A bus buffering at most `capacity` undrained attempts.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "MutationBus capacity must be at least 1");
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// A submission handle for external mutation sources.
    pub fn handle(&self) -> MutationBusHandle {
        MutationBusHandle {
            tx: self.tx.clone(),
        }
    }

    /// Answer every queued attempt with the guard's verdict.
    ///
    /// Returns the number of attempts processed. A submitter that
    /// dropped its reply receiver is skipped silently.
    pub fn drain(&self, guard: &BuildGuard) -> usize {
        let mut processed = 0;
        while let Ok(attempt) = self.rx.try_recv() {
            let verdict = guard.mutation_verdict(attempt.pos);
            // The submitter may have given up waiting; that is its
            // prerogative, not an error here.
            let _ = attempt.reply.send(verdict);
            processed += 1;
        }
        processed
    }
}
