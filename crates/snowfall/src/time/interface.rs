use std::sync::Arc;

/// Default epoch: Monday, January 1, 2018 00:00:00 (UTC+8), in milliseconds
/// since the Unix epoch.
///
/// With the default 40-bit timestamp field this leaves roughly 34 years of
/// ID space.
pub const DEFAULT_EPOCH: u64 = 1_514_736_000_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: u64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
///
/// Today's wall clock is already past the ~34.8 years a 40-bit timestamp
/// field holds, so generators using this epoch with [`Layout::DEFAULT`] fail
/// construction with [`Error::TimestampOverflow`]. Pair it with a layout
/// leaving at least 41 timestamp bits, such as [`Layout::TWITTER`].
///
/// [`Layout::DEFAULT`]: crate::Layout::DEFAULT
/// [`Layout::TWITTER`]: crate::Layout::TWITTER
/// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
pub const UNIX_EPOCH_MILLIS: u64 = 0;

/// A wall-clock time source.
///
/// Implementations return the current time in **milliseconds since the Unix
/// epoch**. Generators subtract their own configured epoch, so a clock knows
/// nothing about ID layouts.
///
/// This abstraction lets you plug in the system clock, or a mocked time source
/// in tests.
///
/// # Example
///
/// ```
/// use snowfall::TimeSource;
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

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
