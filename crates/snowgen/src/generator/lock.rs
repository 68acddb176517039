use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Base62Codec, BitLayout, Error, GeneratorConfig, IdGenStatus, OverflowPolicy, Result,
    SystemClock, TimeSource, generator::Mutex,
};

/// Mutable generator state: the millisecond of the last ID and the sequence
/// used within it.
#[derive(Clone, Copy, Debug, Default)]
struct State {
    last_timestamp: Option<u64>,
    sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// Each ID packs, from most to least significant bit, a millisecond offset
/// from the configured epoch, the datacenter id, the worker id and a
/// per-millisecond sequence (see [`BitLayout`]). The `(last_timestamp,
/// sequence)` pair lives behind a single mutex that is held only while the
/// clock is read and the pair updated; packing happens after it is released.
///
/// Share one instance across threads by reference or through an `Arc`.
///
/// ## Guarantees
/// - IDs from one instance never decrease while the clock does not go back.
/// - Up to `2^sequence_bits` IDs per millisecond; beyond that
///   [`Self::next_id`] waits for the next millisecond.
/// - A clock that moved backward yields [`Error::ClockMovedBackwards`], never
///   a reused timestamp.
///
/// The clock-regression fault is not latched. Every call made while the
/// clock reads behind the last ID fails, and the same instance produces IDs
/// again once the clock passes that point. Callers that need fail-stop
/// behaviour must drop the instance on the first error.
///
/// # Example
///
/// ```
/// use snowgen::IdGenerator;
///
/// let generator = IdGenerator::new(2, 1).unwrap();
/// let a = generator.next_id().unwrap();
/// let b = generator.next_id().unwrap();
/// assert!(a <= b);
///
/// let parts = generator.layout().decompose(b);
/// assert_eq!((parts.worker_id, parts.datacenter_id), (2, 1));
/// ```
#[derive(Debug)]
pub struct IdGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    config: GeneratorConfig,
    layout: BitLayout,
    worker_id: u64,
    datacenter_id: u64,
    time: T,
}

impl IdGenerator<SystemClock> {
    /// Creates a generator with [`GeneratorConfig::default`] reading the
    /// system clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOutOfRange`] or
    /// [`Error::DatacenterIdOutOfRange`] if an id does not fit its field.
    pub fn new(worker_id: u64, datacenter_id: u64) -> Result<Self> {
        Self::with_config(
            worker_id,
            datacenter_id,
            GeneratorConfig::default(),
            SystemClock,
        )
    }
}

impl<T> IdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator from an explicit configuration and time source.
    ///
    /// The generator starts with no last timestamp and a zero sequence.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBitWidths`] if the configured widths are unusable
    /// - [`Error::WorkerIdOutOfRange`] if `worker_id > max_worker_id`
    /// - [`Error::DatacenterIdOutOfRange`] if `datacenter_id >
    ///   max_datacenter_id`
    ///
    /// # Example
    ///
    /// ```
    /// use snowgen::{Error, GeneratorConfig, IdGenerator, MonotonicClock};
    ///
    /// let config = GeneratorConfig::default().with_bits(5, 5, 12);
    /// let generator = IdGenerator::with_config(31, 0, config, MonotonicClock::new()).unwrap();
    /// assert_eq!(generator.worker_id(), 31);
    ///
    /// let err = IdGenerator::with_config(32, 0, config, MonotonicClock::new()).unwrap_err();
    /// assert_eq!(err, Error::WorkerIdOutOfRange { worker_id: 32, max: 31 });
    /// ```
    pub fn with_config(
        worker_id: u64,
        datacenter_id: u64,
        config: GeneratorConfig,
        time: T,
    ) -> Result<Self> {
        let layout = config.layout()?;

        if worker_id > layout.max_worker_id() {
            return Err(Error::WorkerIdOutOfRange {
                worker_id,
                max: layout.max_worker_id(),
            });
        }
        if datacenter_id > layout.max_datacenter_id() {
            return Err(Error::DatacenterIdOutOfRange {
                datacenter_id,
                max: layout.max_datacenter_id(),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            worker_id,
            datacenter_id,
            ?layout,
            epoch_ms = config.epoch_millis(),
            "id generator ready"
        );

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::default())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::default()),
            config,
            layout,
            worker_id,
            datacenter_id,
            time,
        })
    }

    /// Worker id embedded in every ID.
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Datacenter id embedded in every ID.
    pub const fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Bit layout used to pack and decompose IDs.
    pub const fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// Configuration the generator was built from.
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the next ID, waiting for the clock if the sequence for the
    /// current millisecond is exhausted.
    ///
    /// The wait polls [`Self::poll_id`] and yields the thread between polls.
    /// It lasts at most until the clock ticks over, unless the clock stalls.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackwards`] if the clock reads earlier than the
    ///   timestamp of the previous ID
    /// - [`Error::ClockBeforeEpoch`] if the clock reads earlier than the epoch
    /// - [`Error::TimestampOverflow`] under [`OverflowPolicy::Reject`]
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (std mutex only)
    pub fn next_id(&self) -> Result<i64> {
        loop {
            match self.poll_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => std::thread::yield_now(),
            }
        }
    }

    /// [`Self::next_id`] rendered in base 10.
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    pub fn next_id_string(&self) -> Result<String> {
        self.next_id().map(|id| id.to_string())
    }

    /// [`Self::next_id`] rendered with [`Base62Codec::encode`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    pub fn next_id_compact(&self) -> Result<String> {
        // IDs are never negative
        self.next_id().map(|id| Base62Codec::encode(id.unsigned_abs()))
    }

    /// Makes a single, non-blocking attempt to generate an ID.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID is available
    /// - `Ok(IdGenStatus::Pending { yield_for })`: the sequence for this
    ///   millisecond is spent; try again after `yield_for` milliseconds
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`]. The generator state is left untouched on
    /// error, so a clock that catches up again resumes where it left off.
    ///
    /// # Example
    ///
    /// ```
    /// use snowgen::{IdGenStatus, IdGenerator};
    ///
    /// let generator = IdGenerator::new(0, 0).unwrap();
    /// let id = loop {
    ///     match generator.poll_id() {
    ///         Ok(IdGenStatus::Ready { id }) => break id,
    ///         Ok(IdGenStatus::Pending { yield_for }) => {
    ///             std::thread::sleep(std::time::Duration::from_millis(yield_for));
    ///         }
    ///         Err(e) => panic!("generator error: {e}"),
    ///     }
    /// };
    /// assert!(id >= 0);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Result<IdGenStatus> {
        let (offset, sequence) = {
            let mut state = {
                #[cfg(feature = "parking-lot")]
                {
                    self.state.lock()
                }
                #[cfg(not(feature = "parking-lot"))]
                {
                    self.state.lock()?
                }
            };

            // Read under the lock so concurrent callers observe the clock in
            // the same order they update the state.
            let now = self.time.current_millis();
            let offset = self.offset_of(now)?;

            match state.last_timestamp.map(|last| (now.cmp(&last), last)) {
                Some((Ordering::Equal, _)) => {
                    if state.sequence < self.layout.sequence_mask() {
                        state.sequence += 1;
                    } else {
                        return Ok(IdGenStatus::Pending { yield_for: 1 });
                    }
                }
                Some((Ordering::Less, last)) => return Err(Self::cold_clock_behind(last, now)),
                Some((Ordering::Greater, _)) | None => {
                    state.last_timestamp = Some(now);
                    state.sequence = 0;
                }
            }

            (offset, state.sequence)
        };

        Ok(IdGenStatus::Ready {
            id: self
                .layout
                .pack(offset, self.datacenter_id, self.worker_id, sequence),
        })
    }

    /// Milliseconds between the epoch and `now`, checked against the overflow
    /// policy.
    fn offset_of(&self, now: u64) -> Result<u64> {
        let epoch = self.config.epoch_millis();
        let offset = now
            .checked_sub(epoch)
            .ok_or(Error::ClockBeforeEpoch { now, epoch })?;

        match self.config.overflow_policy {
            OverflowPolicy::Reject if offset > self.layout.max_timestamp() => {
                Err(Error::TimestampOverflow {
                    offset,
                    max: self.layout.max_timestamp(),
                })
            }
            _ => Ok(offset),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: u64, now: u64) -> Error {
        debug_assert!(now < last);
        #[cfg(feature = "tracing")]
        tracing::error!(last, now, behind_ms = last - now, "clock moved backwards");
        Error::ClockMovedBackwards { last, now }
    }
}
