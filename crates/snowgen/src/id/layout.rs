use crate::{Error, Result};
use core::fmt;

/// Number of bits an ID may occupy. The sign bit of the `i64` is reserved.
pub const USABLE_BITS: u8 = 63;

/// The bit layout of a generated ID and every constant derived from it.
///
/// Fields are packed from the least significant bit upward: sequence, worker
/// id, datacenter id, then the timestamp offset in whatever bits remain.
///
/// ```text
///  Bit Index:  63           63 62          24 23            20 19        16 15             0
///              +--------------+--------------+----------------+------------+---------------+
///  Field:      | reserved (1) | timestamp    | datacenter (4) | worker (4) | sequence (16) |
///              +--------------+--------------+----------------+------------+---------------+
///              |<----------- MSB ------------- 64 bits ------------- LSB ------------------>|
/// ```
///
/// The diagram shows the default 4/4/16 layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitLayout {
    worker_id_bits: u8,
    datacenter_id_bits: u8,
    sequence_bits: u8,
}

/// The fields of an ID, as recovered by [`BitLayout::decompose`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdParts {
    /// Milliseconds since the generator's epoch.
    pub timestamp: u64,
    pub datacenter_id: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

impl BitLayout {
    /// Validates the field widths and returns the layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBitWidths`] if any width is zero or if the
    /// three widths leave no bit for the timestamp.
    pub const fn new(
        worker_id_bits: u8,
        datacenter_id_bits: u8,
        sequence_bits: u8,
    ) -> Result<Self> {
        let total = worker_id_bits as u16 + datacenter_id_bits as u16 + sequence_bits as u16;
        if worker_id_bits == 0
            || datacenter_id_bits == 0
            || sequence_bits == 0
            || total >= USABLE_BITS as u16
        {
            return Err(Error::InvalidBitWidths {
                worker_id_bits,
                datacenter_id_bits,
                sequence_bits,
            });
        }
        Ok(Self {
            worker_id_bits,
            datacenter_id_bits,
            sequence_bits,
        })
    }

    /// Width of the worker id field.
    pub const fn worker_id_bits(&self) -> u8 {
        self.worker_id_bits
    }

    /// Width of the datacenter id field.
    pub const fn datacenter_id_bits(&self) -> u8 {
        self.datacenter_id_bits
    }

    /// Width of the sequence field.
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Bits left to the timestamp offset.
    pub const fn timestamp_bits(&self) -> u8 {
        USABLE_BITS - self.timestamp_shift() as u8
    }

    /// Largest worker id the layout can hold.
    pub const fn max_worker_id(&self) -> u64 {
        (1 << self.worker_id_bits) - 1
    }

    /// Largest datacenter id the layout can hold.
    pub const fn max_datacenter_id(&self) -> u64 {
        (1 << self.datacenter_id_bits) - 1
    }

    /// Largest sequence value; also the mask applied when incrementing.
    pub const fn sequence_mask(&self) -> u64 {
        (1 << self.sequence_bits) - 1
    }

    /// Largest timestamp offset that packs without touching the sign bit.
    pub const fn max_timestamp(&self) -> u64 {
        (1 << self.timestamp_bits()) - 1
    }

    /// Left shift of the worker id field.
    pub const fn worker_shift(&self) -> u32 {
        self.sequence_bits as u32
    }

    /// Left shift of the datacenter id field.
    pub const fn datacenter_shift(&self) -> u32 {
        self.worker_id_bits as u32 + self.worker_shift()
    }

    /// Left shift of the timestamp field.
    pub const fn timestamp_shift(&self) -> u32 {
        self.datacenter_id_bits as u32 + self.datacenter_shift()
    }

    /// Packs the fields into an ID.
    ///
    /// `datacenter_id`, `worker_id` and `sequence` must already be within
    /// their ranges. A `timestamp` larger than [`Self::max_timestamp`] spills
    /// into the sign bit (and past it); a negative result is negated and
    /// masked to 63 bits so the returned value is never negative. Such IDs no
    /// longer sort by time and are not guaranteed unique: a negative value of
    /// exactly `i64::MIN` (overflowed timestamp, every other field zero)
    /// comes back as `0`, the same ID as offset 0 with all fields zero.
    pub const fn pack(
        &self,
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> i64 {
        let id = ((timestamp as i64) << self.timestamp_shift())
            | ((datacenter_id as i64) << self.datacenter_shift())
            | ((worker_id as i64) << self.worker_shift())
            | sequence as i64;
        if id < 0 { id.wrapping_neg() & i64::MAX } else { id }
    }

    /// Splits an ID back into its fields.
    pub const fn decompose(&self, id: i64) -> IdParts {
        let raw = id as u64;
        IdParts {
            timestamp: (raw >> self.timestamp_shift()) & self.max_timestamp(),
            datacenter_id: (raw >> self.datacenter_shift()) & self.max_datacenter_id(),
            worker_id: (raw >> self.worker_shift()) & self.max_worker_id(),
            sequence: raw & self.sequence_mask(),
        }
    }
}

impl Default for BitLayout {
    /// The 4/4/16 layout: 16 workers, 16 datacenters, 65 536 IDs per
    /// millisecond and 39 bits (about 17 years) of timestamp.
    fn default() -> Self {
        Self {
            worker_id_bits: 4,
            datacenter_id_bits: 4,
            sequence_bits: 16,
        }
    }
}

impl fmt::Debug for BitLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitLayout")
            .field("timestamp", &(self.timestamp_bits(), self.timestamp_shift()))
            .field(
                "datacenter_id",
                &(self.datacenter_id_bits, self.datacenter_shift()),
            )
            .field("worker_id", &(self.worker_id_bits, self.worker_shift()))
            .field("sequence", &(self.sequence_bits, 0))
            .finish()
    }
}
