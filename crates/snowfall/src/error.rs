use core::fmt;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Which identity component failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityField {
    Datacenter,
    Worker,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datacenter => f.write_str("datacenter_id"),
            Self::Worker => f.write_str("worker_id"),
        }
    }
}

/// All error variants that `snowfall` can emit.
///
/// Construction errors ([`Error::InvalidIdentity`], [`Error::InvalidLayout`],
/// [`Error::EpochInFuture`]) mean the generator was misconfigured and no
/// instance exists. Clock errors ([`Error::ClockRolledBack`],
/// [`Error::ClockBeforeEpoch`]) are reported per call: no ID was issued and
/// the generator state is unchanged, so the caller owns the retry policy.
/// [`Error::TimestampOverflow`] is reported at construction for an epoch too
/// old for the layout, and per call once the layout's lifetime runs out.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A datacenter or worker ID does not fit in its bit field.
    #[error("{field} ({value}) out of range, expected 0..={max}")]
    InvalidIdentity {
        field: IdentityField,
        value: u64,
        max: u64,
    },

    /// The requested field widths leave no room for a timestamp.
    #[error(
        "invalid layout: sequence ({sequence_bits}) + worker ({worker_bits}) + datacenter ({datacenter_bits}) bits must leave at least one timestamp bit"
    )]
    InvalidLayout {
        sequence_bits: u8,
        worker_bits: u8,
        datacenter_bits: u8,
    },

    /// The configured epoch is later than the clock at construction.
    #[error("epoch ({epoch} ms) is later than the current time ({now} ms)")]
    EpochInFuture { epoch: u64, now: u64 },

    /// Milliseconds elapsed since the epoch no longer fit the layout's
    /// timestamp field.
    ///
    /// Reported at construction when the epoch is too old for the layout, and
    /// per call once the layout's lifetime runs out.
    #[error("{elapsed} ms since the epoch exceeds the timestamp field (max = {max})")]
    TimestampOverflow { elapsed: u64, max: u64 },

    /// The clock moved backwards since the last issued ID.
    ///
    /// `millis` is the rollback magnitude: the previous timestamp minus the
    /// current reading.
    #[error("clock moved backwards by {millis} ms")]
    ClockRolledBack { millis: u64 },

    /// The clock reads earlier than the configured epoch.
    #[error("clock ({now} ms) is earlier than the epoch ({epoch} ms)")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is never produced.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` for per-call clock anomalies, as opposed to
    /// configuration or lock failures.
    pub const fn is_clock_error(&self) -> bool {
        matches!(
            self,
            Self::ClockRolledBack { .. } | Self::ClockBeforeEpoch { .. }
        )
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_error_names_field_and_range() {
        let err = Error::InvalidIdentity {
            field: IdentityField::Worker,
            value: 256,
            max: 255,
        };
        assert_eq!(err.to_string(), "worker_id (256) out of range, expected 0..=255");
        assert!(!err.is_clock_error());
    }

    #[test]
    fn rollback_is_a_clock_error() {
        let err = Error::ClockRolledBack { millis: 5 };
        assert_eq!(err.to_string(), "clock moved backwards by 5 ms");
        assert!(err.is_clock_error());
        assert!(Error::ClockBeforeEpoch { now: 1, epoch: 2 }.is_clock_error());
    }

    #[test]
    fn timestamp_overflow_is_not_a_clock_error() {
        let err = Error::TimestampOverflow {
            elapsed: 1 << 40,
            max: (1 << 40) - 1,
        };
        assert_eq!(
            err.to_string(),
            "1099511627776 ms since the epoch exceeds the timestamp field (max = 1099511627775)"
        );
        assert!(!err.is_clock_error());
    }
}
