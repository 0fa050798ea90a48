use crate::{
    GeneratorConfig, Parts, Result, SnowflakeId, TimeSource,
    generator::{Poll, state},
};

/// A minimal interface for generating Snowflake IDs.
pub trait SnowflakeGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a generator from a validated config.
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
    fn from_config(config: GeneratorConfig, time: T) -> Result<Self>;

    /// The configuration this generator was built with.
    fn config(&self) -> &GeneratorConfig;

    /// The clock this generator reads.
    fn time(&self) -> &T;

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRolledBack`] if the clock reads earlier than the last
    ///   issued ID.
    /// - [`Error::ClockBeforeEpoch`] if the first reading precedes the epoch.
    /// - [`Error::LockPoisoned`] for lock-based generators whose lock was
    ///   poisoned.
    ///
    /// [`Error::ClockRolledBack`]: crate::Error::ClockRolledBack
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    fn try_poll_id(&self) -> Result<Poll>;

    /// Generates the next ID, calling `f(yield_until)` each time the current
    /// millisecond is exhausted.
    ///
    /// `f` decides how to wait: spin, yield the thread, or sleep.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_poll_id`].
    fn next_id_with(&self, mut f: impl FnMut(u64)) -> Result<SnowflakeId> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_until } => f(yield_until),
            }
        }
    }

    /// Generates the next ID, busy-waiting through sequence exhaustion.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_poll_id`].
    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id_with(|_| core::hint::spin_loop())
    }

    /// Splits an ID issued under this generator's layout into its fields.
    fn decompose(&self, id: SnowflakeId) -> Parts {
        self.config().layout.decompose(id)
    }

    /// The Unix millisecond encoded in an ID issued under this generator's
    /// layout and epoch.
    fn timestamp_millis(&self, id: SnowflakeId) -> u64 {
        self.config()
            .epoch_millis
            .saturating_add(self.decompose(id).timestamp)
    }
}

/// Shared construction path: validate once against a single clock reading.
pub(crate) fn validated(config: GeneratorConfig, time: &impl TimeSource) -> Result<GeneratorConfig> {
    config.validate_at(time.current_millis())?;
    Ok(config)
}

/// One polling step against `state`, shared by every generator.
pub(crate) fn poll(
    state: &mut state::State,
    config: &GeneratorConfig,
    time: &impl TimeSource,
) -> Result<Poll> {
    let now = time.current_millis();
    match state.advance(now, config)? {
        state::Step::Issued {
            timestamp,
            sequence,
        } => Ok(Poll::Ready {
            id: state::compose(config, timestamp, sequence),
        }),
        state::Step::Exhausted { last_timestamp } => Ok(Poll::Pending {
            yield_until: last_timestamp + 1,
        }),
    }
}

/// Runs the state machine to completion, spinning on the clock through
/// sequence exhaustion.
pub(crate) fn issue(
    state: &mut state::State,
    config: &GeneratorConfig,
    time: &impl TimeSource,
) -> Result<SnowflakeId> {
    let mut now = time.current_millis();
    loop {
        match state.advance(now, config)? {
            state::Step::Issued {
                timestamp,
                sequence,
            } => return Ok(state::compose(config, timestamp, sequence)),
            state::Step::Exhausted { last_timestamp } => {
                now = state::wait_past(time, last_timestamp);
            }
        }
    }
}
