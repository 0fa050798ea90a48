use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    GeneratorConfig, Layout, Result, SnowflakeId, TimeSource,
    generator::{Mutex, MutexGuard, Poll, SnowflakeGenerator, interface, state::State},
};

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// This generator wraps the generation state in an [`Arc<Mutex<_>>`], allowing
/// safe shared use across threads. Every call, clock reading included, runs
/// inside the lock, so a thread never compares its reading against a newer
/// timestamp issued by another thread.
///
/// Cloning is cheap and the clones share state: they behave as one generator.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Any [`Layout`]
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
///
/// [`BasicSnowflakeGenerator`]: crate::generator::BasicSnowflakeGenerator
pub struct LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<State>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<State>>,
    pub(crate) config: GeneratorConfig,
    pub(crate) time: T,
}

impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config,
            time: self.time.clone(),
        }
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockSnowflakeGenerator`] with [`Layout::DEFAULT`].
    ///
    /// # Parameters
    ///
    /// - `datacenter_id`, `worker_id`: this instance's identity. The pair must
    ///   be unique among all live generators sharing an ID space.
    /// - `epoch_millis`: time zero of the timestamp field, in Unix
    ///   milliseconds. Must not be in the future.
    /// - `time`: the [`TimeSource`] sampled on every call.
    ///
    /// # Errors
    ///
    /// See [`Self::from_config`].
    ///
    /// # Example
    /// ```
    /// use snowfall::{LockSnowflakeGenerator, DEFAULT_EPOCH, SystemClock};
    ///
    /// let generator = LockSnowflakeGenerator::new(0, 1, DEFAULT_EPOCH, SystemClock).unwrap();
    ///
    /// let a = generator.next_id().unwrap();
    /// let b = generator.next_id().unwrap();
    /// assert!(a < b);
    /// ```
    pub fn new(datacenter_id: u64, worker_id: u64, epoch_millis: u64, time: T) -> Result<Self> {
        Self::from_config(
            GeneratorConfig::new(datacenter_id, worker_id, epoch_millis),
            time,
        )
    }

    /// Creates a new [`LockSnowflakeGenerator`] with a custom [`Layout`].
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
        Ok(Self::from_parts(config, time))
    }

    /// Builds a generator without validating `config`.
    pub(crate) fn from_parts(config: GeneratorConfig, time: T) -> Self {
        let state = Mutex::new(State::new());
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(state),
            config,
            time,
        }
    }

    /// Generates the next ID.
    ///
    /// The lock is held for the whole call. If the current millisecond's
    /// sequence is exhausted, the calling thread spins on the clock until it
    /// advances, still holding the lock; other callers queue behind it.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRolledBack`] if the clock moved backwards since the
    ///   last ID. No ID is issued and the state is unchanged.
    /// - [`Error::ClockBeforeEpoch`] if the first reading precedes the epoch.
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (never with the `parking-lot` feature).
    ///
    /// [`Error::ClockRolledBack`]: crate::Error::ClockRolledBack
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        interface::issue(&mut state, &self.config, &self.time)
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: A new ID is available
    /// - `Ok(Poll::Pending { yield_until })`: The millisecond is exhausted;
    ///   retry once the clock reaches `yield_until`
    /// - `Err(e)`: the clock misbehaved or the lock was poisoned
    ///
    /// # Errors
    ///
    /// See [`Self::next_id`].
    ///
    /// # Example
    /// ```
    /// use snowfall::{LockSnowflakeGenerator, Poll, DEFAULT_EPOCH, SystemClock};
    ///
    /// let generator = LockSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, SystemClock).unwrap();
    ///
    /// let id = loop {
    ///     match generator.try_poll_id() {
    ///         Ok(Poll::Ready { id }) => break id,
    ///         Ok(Poll::Pending { .. }) => std::thread::yield_now(),
    ///         Err(e) => panic!("Generator error: {e}"),
    ///     }
    /// };
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let mut state = self.lock()?;
        interface::poll(&mut state, &self.config, &self.time)
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T> SnowflakeGenerator<T> for LockSnowflakeGenerator<T>
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
