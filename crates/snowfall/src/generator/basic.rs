use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    GeneratorConfig, Layout, Result, SnowflakeId, TimeSource,
    generator::{Poll, SnowflakeGenerator, interface, state::State},
};

/// A non-concurrent Snowflake ID generator suitable for single-threaded
/// environments.
///
/// This generator is lightweight and fast, but **not thread-safe**.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Any [`Layout`]
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::generator::LockSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    state: Cell<State>,
    config: GeneratorConfig,
    time: T,
}

impl<T> BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicSnowflakeGenerator`] with [`Layout::DEFAULT`].
    ///
    /// # Errors
    ///
    /// See [`Self::from_config`].
    ///
    /// # Example
    /// ```
    /// use snowfall::{BasicSnowflakeGenerator, DEFAULT_EPOCH, SnowflakeGenerator, SystemClock};
    ///
    /// let generator = BasicSnowflakeGenerator::new(1, 2, DEFAULT_EPOCH, SystemClock).unwrap();
    ///
    /// let id = generator.next_id().unwrap();
    /// let parts = generator.decompose(id);
    /// assert_eq!((parts.datacenter_id, parts.worker_id), (1, 2));
    /// ```
    pub fn new(datacenter_id: u64, worker_id: u64, epoch_millis: u64, time: T) -> Result<Self> {
        Self::from_config(
            GeneratorConfig::new(datacenter_id, worker_id, epoch_millis),
            time,
        )
    }

    /// Creates a new [`BasicSnowflakeGenerator`] with a custom [`Layout`].
    ///
    /// # Errors
    ///
    /// See [`Self::from_config`].
    pub fn with_layout(
        datacenter_id: u64,
        worker_id: u64,
        epoch_millis: u64,
        layout: Layout,
        time: T,
    ) -> Result<Self> {
        Self::from_config(
            GeneratorConfig::new(datacenter_id, worker_id, epoch_millis).with_layout(layout),
            time,
        )
    }

    /// Creates a generator from a config, validating it once.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIdentity`] if the datacenter or worker ID does not
    ///   fit the layout.
    /// - [`Error::EpochInFuture`] if `time` currently reads earlier than the
    ///   epoch.
    ///
    /// [`Error::InvalidIdentity`]: crate::Error::InvalidIdentity
    /// [`Error::EpochInFuture`]: crate::Error::EpochInFuture
    pub fn from_config(config: GeneratorConfig, time: T) -> Result<Self> {
        let config = interface::validated(config, &time)?;
        Ok(Self {
            state: Cell::new(State::new()),
            config,
            time,
        })
    }

    /// Generates the next ID, busy-waiting if the current millisecond's
    /// sequence is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRolledBack`] if the clock moved backwards since the
    ///   last ID.
    /// - [`Error::ClockBeforeEpoch`] if the first reading precedes the epoch.
    ///
    /// [`Error::ClockRolledBack`]: crate::Error::ClockRolledBack
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.get();
        let res = interface::issue(&mut state, &self.config, &self.time);
        self.state.set(state);
        res
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: A new ID is available
    /// - `Ok(Poll::Pending { yield_until })`: The millisecond is exhausted;
    ///   retry once the clock reaches `yield_until`
    /// - `Err(_)`: the clock moved backwards or precedes the epoch
    ///
    /// # Errors
    ///
    /// See [`Self::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let mut state = self.state.get();
        let res = interface::poll(&mut state, &self.config, &self.time);
        self.state.set(state);
        res
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl<T> SnowflakeGenerator<T> for BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn from_config(config: GeneratorConfig, time: T) -> Result<Self> {
        Self::from_config(config, time)
    }

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn time(&self) -> &T {
        &self.time
    }

    fn try_poll_id(&self) -> Result<Poll> {
        self.try_poll_id()
    }

    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id()
    }
}
