use crate::{DEFAULT_EPOCH, Error, IdentityField, Layout, Result};

/// Everything a generator needs besides its clock.
///
/// The config is fixed for a generator's lifetime. Uniqueness across a fleet
/// depends on every live generator having a distinct
/// `(datacenter_id, worker_id)` pair; assigning those is up to the deployment.
///
/// With the `serde` feature, missing fields fall back to [`Default`], so a
/// service can embed only what it overrides:
///
/// ```ignore
/// [snowflake]
/// worker_id = 12
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Time zero of the timestamp field, in milliseconds since the Unix epoch.
    pub epoch_millis: u64,
    pub datacenter_id: u64,
    pub worker_id: u64,
    pub layout: Layout,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_EPOCH)
    }
}

impl GeneratorConfig {
    /// A config using [`Layout::DEFAULT`].
    pub const fn new(datacenter_id: u64, worker_id: u64, epoch_millis: u64) -> Self {
        Self {
            epoch_millis,
            datacenter_id,
            worker_id,
            layout: Layout::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Checks both identity values against the layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] naming the first out-of-range field,
    /// datacenter first.
    pub const fn validate(&self) -> Result<()> {
        let max = self.layout.max_datacenter_id();
        if self.datacenter_id > max {
            return Err(Error::InvalidIdentity {
                field: IdentityField::Datacenter,
                value: self.datacenter_id,
                max,
            });
        }
        let max = self.layout.max_worker_id();
        if self.worker_id > max {
            return Err(Error::InvalidIdentity {
                field: IdentityField::Worker,
                value: self.worker_id,
                max,
            });
        }
        Ok(())
    }

    /// [`Self::validate`], plus the epoch must not be later than `now` and
    /// `now` must still fit the timestamp field.
    pub(crate) fn validate_at(&self, now: u64) -> Result<()> {
        self.validate()?;
        if self.epoch_millis > now {
            return Err(Error::EpochInFuture {
                epoch: self.epoch_millis,
                now,
            });
        }
        self.check_elapsed(now)?;
        Ok(())
    }

    /// Milliseconds from the epoch to `now`, if the layout can encode them.
    ///
    /// `now` must not precede the epoch.
    pub(crate) const fn check_elapsed(&self, now: u64) -> Result<u64> {
        let elapsed = now - self.epoch_millis;
        let max = self.layout.max_timestamp();
        if elapsed > max {
            return Err(Error::TimestampOverflow { elapsed, max });
        }
        Ok(elapsed)
    }
}
