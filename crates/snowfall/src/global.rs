use std::sync::OnceLock;

use crate::{GeneratorConfig, LockSnowflakeGenerator, SystemClock};

static GLOBAL: OnceLock<LockSnowflakeGenerator<SystemClock>> = OnceLock::new();

/// A lazily created, process-wide generator.
///
/// It reads the [`SystemClock`] and uses [`GeneratorConfig::default`]:
/// datacenter `0`, worker `0`, [`DEFAULT_EPOCH`] and [`Layout::DEFAULT`].
/// Every process calling this shares that identity, so it only suits
/// deployments with a single generating process per ID space. Anything else
/// should construct its own generator with an assigned identity and pass it
/// where it is needed.
///
/// The default identity always fits the default layout. If the system clock
/// reads earlier than the epoch, [`LockSnowflakeGenerator::next_id`] reports
/// [`Error::ClockBeforeEpoch`].
///
/// # Example
/// ```
/// let a = snowfall::global().next_id().unwrap();
/// let b = snowfall::global().next_id().unwrap();
/// assert!(a < b);
/// ```
///
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
/// [`Layout::DEFAULT`]: crate::Layout::DEFAULT
/// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
pub fn global() -> &'static LockSnowflakeGenerator<SystemClock> {
    GLOBAL.get_or_init(|| {
        LockSnowflakeGenerator::from_parts(GeneratorConfig::default(), SystemClock)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnowflakeGenerator;

    #[test]
    fn global_is_a_single_instance() {
        assert!(core::ptr::eq(global(), global()));
        assert_eq!(global().config(), &GeneratorConfig::default());
    }

    #[test]
    fn global_issues_increasing_ids() {
        let a = global().next_id().unwrap();
        let b = global().next_id().unwrap();
        assert!(a < b);
        let parts = global().decompose(b);
        assert_eq!((parts.datacenter_id, parts.worker_id), (0, 0));
    }
}
