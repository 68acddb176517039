use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The wall clock, read on every call.
///
/// This is the default time source of [`IdGenerator`]. Wall time can be
/// adjusted externally (NTP steps, manual changes), which is exactly the case
/// the generator guards against with [`Error::ClockMovedBackwards`].
///
/// A clock set before 1970 reads as `0`, which the generator then rejects as
/// [`Error::ClockBeforeEpoch`].
///
/// [`IdGenerator`]: crate::IdGenerator
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
/// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
