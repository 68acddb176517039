/// A result type defaulting to this crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowgen` can emit.
///
/// The configuration variants are only produced while constructing a
/// generator. The clock and overflow variants are produced by
/// [`IdGenerator::next_id`] and mean that no safe ID exists for the current
/// call.
///
/// [`IdGenerator::next_id`]: crate::IdGenerator::next_id
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The worker id does not fit in the configured worker field.
    #[error("worker id {worker_id} is out of range 0..={max}")]
    WorkerIdOutOfRange { worker_id: u64, max: u64 },

    /// The datacenter id does not fit in the configured datacenter field.
    #[error("datacenter id {datacenter_id} is out of range 0..={max}")]
    DatacenterIdOutOfRange { datacenter_id: u64, max: u64 },

    /// The configured field widths leave no room for a timestamp inside the
    /// 63 usable bits, or a field has zero width.
    #[error(
        "invalid bit widths: worker={worker_id_bits} datacenter={datacenter_id_bits} \
         sequence={sequence_bits} (each must be >= 1 and the sum must be < 63)"
    )]
    InvalidBitWidths {
        worker_id_bits: u8,
        datacenter_id_bits: u8,
        sequence_bits: u8,
    },

    /// The clock reported a time earlier than the last one used for an ID.
    ///
    /// The generator refuses to produce an ID rather than risk a duplicate or
    /// an out-of-order value.
    #[error("clock moved backwards from {last} ms to {now} ms: refusing to generate id")]
    ClockMovedBackwards { last: u64, now: u64 },

    /// The clock reported a time earlier than the configured epoch.
    #[error("clock ({now} ms) is earlier than the configured epoch ({epoch} ms)")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    /// The timestamp offset no longer fits its field and the generator is
    /// configured with [`OverflowPolicy::Reject`].
    ///
    /// [`OverflowPolicy::Reject`]: crate::OverflowPolicy::Reject
    #[error("timestamp offset {offset} exceeds the {max} ms the layout can hold")]
    TimestampOverflow { offset: u64, max: u64 },

    /// The generator lock was poisoned by a panicking thread.
    ///
    /// Never produced with the `parking-lot` feature, whose mutexes do not
    /// poison.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` for errors raised while validating a configuration.
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::WorkerIdOutOfRange { .. }
                | Self::DatacenterIdOutOfRange { .. }
                | Self::InvalidBitWidths { .. }
        )
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
