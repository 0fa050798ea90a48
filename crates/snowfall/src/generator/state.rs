use core::cmp::Ordering;

use crate::{Error, GeneratorConfig, Result, SnowflakeId, TimeSource};

/// Mutable generation state: the timestamp of the last issued ID and the
/// sequence used with it.
///
/// `last_timestamp` is absolute Unix milliseconds, `None` until the first ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    last_timestamp: Option<u64>,
    sequence: u64,
}

/// What [`State::advance`] decided for one clock reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The state now holds `(timestamp, sequence)`; issue an ID for it.
    Issued { timestamp: u64, sequence: u64 },
    /// The sequence space of `last_timestamp` is used up. State is unchanged.
    Exhausted { last_timestamp: u64 },
}

impl State {
    pub(crate) const fn new() -> Self {
        Self {
            last_timestamp: None,
            sequence: 0,
        }
    }

    /// Applies one clock reading.
    ///
    /// The state is only written when an ID is issued; every error and
    /// [`Step::Exhausted`] leave it untouched.
    pub(crate) fn advance(&mut self, now: u64, config: &GeneratorConfig) -> Result<Step> {
        let Some(last) = self.last_timestamp else {
            if now < config.epoch_millis {
                return Err(cold_clock_before_epoch(now, config.epoch_millis));
            }
            return self.rollover_to(now, config);
        };

        match now.cmp(&last) {
            Ordering::Equal => {
                let next = (self.sequence + 1) & config.layout.max_sequence();
                if next == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(timestamp = last, "sequence exhausted");
                    Ok(Step::Exhausted {
                        last_timestamp: last,
                    })
                } else {
                    self.sequence = next;
                    Ok(Step::Issued {
                        timestamp: now,
                        sequence: next,
                    })
                }
            }
            Ordering::Greater => self.rollover_to(now, config),
            Ordering::Less => Err(cold_clock_behind(now, last)),
        }
    }

    fn rollover_to(&mut self, now: u64, config: &GeneratorConfig) -> Result<Step> {
        config.check_elapsed(now).map_err(cold_timestamp_overflow)?;
        self.last_timestamp = Some(now);
        self.sequence = 0;
        Ok(Step::Issued {
            timestamp: now,
            sequence: 0,
        })
    }
}

/// Packs an issued `(timestamp, sequence)` with the configured identity.
pub(crate) fn compose(config: &GeneratorConfig, timestamp: u64, sequence: u64) -> SnowflakeId {
    config.layout.compose(
        timestamp - config.epoch_millis,
        config.datacenter_id,
        config.worker_id,
        sequence,
    )
}

/// Spins until the clock reads past `last_timestamp` and returns that reading.
pub(crate) fn wait_past<T: TimeSource>(time: &T, last_timestamp: u64) -> u64 {
    loop {
        let now = time.current_millis();
        if now > last_timestamp {
            return now;
        }
        core::hint::spin_loop();
    }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(now: u64, last: u64) -> Error {
    let millis = last - now;
    #[cfg(feature = "tracing")]
    tracing::warn!(now, last, millis, "clock moved backwards, refusing to issue ID");
    Error::ClockRolledBack { millis }
}

#[cold]
#[inline(never)]
fn cold_timestamp_overflow(err: Error) -> Error {
    #[cfg(feature = "tracing")]
    tracing::error!(error = %err, "timestamp field exhausted, refusing to issue ID");
    err
}

#[cold]
#[inline(never)]
fn cold_clock_before_epoch(now: u64, epoch: u64) -> Error {
    #[cfg(feature = "tracing")]
    tracing::warn!(now, epoch, "clock reads earlier than epoch");
    Error::ClockBeforeEpoch { now, epoch }
}
