use crate::TimeSource;
use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A time source that never moves backward.
///
/// At construction the clock records the wall-clock time once, then a
/// background thread publishes the elapsed milliseconds (measured with
/// `Instant`) into a shared atomic. Reads are a single atomic load and are
/// immune to wall-clock adjustments made after startup.
///
/// Clones share the same ticker. The ticker thread exits once the last clone
/// is dropped.
///
/// # Example
///
/// ```
/// use snowgen::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(2));
/// assert!(clock.current_millis() >= a);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    anchor: u64, // wall-clock millis at construction
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Starts a new ticker anchored at the current wall-clock time.
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = start.elapsed().as_millis() as u64;
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                tick = now_ms + 1;
            }
        });

        let _ = inner._handle.set(handle);

        Self { inner, anchor }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor + self.inner.current.load(Ordering::Relaxed)
    }
}
