use core::time::Duration;

/// Default epoch: Monday, October 26, 2020 08:58:34.272 UTC
///
/// Every generator built from [`GeneratorConfig::default`] measures its
/// timestamps from this instant. IDs minted against different epochs are not
/// comparable by time.
///
/// [`GeneratorConfig::default`]: crate::GeneratorConfig::default
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_603_702_714_272);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A source of wall-clock milliseconds.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// ticker, or a mocked time source in tests. The returned value is
/// milliseconds since the Unix epoch; the generator subtracts its configured
/// epoch itself.
///
/// # Example
///
/// ```
/// use snowgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
