use core::fmt;

/// A packed 64-bit Snowflake ID.
///
/// IDs compare by their raw value, which orders them by timestamp first, then
/// datacenter, worker and sequence. The field boundaries depend on the
/// [`Layout`] that produced the ID, so decoding goes through the layout (or
/// the generator that issued it).
///
/// [`Layout`]: crate::Layout
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Wraps a raw value without checking it against any layout.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns the ID as a zero-padded 20-digit string, so that lexicographic
    /// order matches numeric order.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnowflakeId")
            .field(&format_args!("{} (0x{:016x})", self.id, self.id))
            .finish()
    }
}

impl core::str::FromStr for SnowflakeId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self::from_raw)
    }
}

/// The decoded fields of a [`SnowflakeId`].
///
/// `timestamp` is relative to the generator's epoch; add the epoch back to get
/// Unix milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parts {
    pub timestamp: u64,
    pub datacenter_id: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_string_sorts_like_numbers() {
        let small = SnowflakeId::from_raw(9);
        let large = SnowflakeId::from_raw(10);
        assert_eq!(small.to_padded_string(), "00000000000000000009");
        assert!(small.to_padded_string() < large.to_padded_string());
        assert_eq!(SnowflakeId::from_raw(u64::MAX).to_padded_string().len(), 20);
    }

    #[test]
    fn parses_and_displays_decimal() {
        let id: SnowflakeId = "123456789".parse().unwrap();
        assert_eq!(id.to_raw(), 123_456_789);
        assert_eq!(id.to_string(), "123456789");
        assert_eq!(u64::from(id), 123_456_789);
        assert!("-1".parse::<SnowflakeId>().is_err());
    }

    #[test]
    fn debug_shows_hex() {
        let id = SnowflakeId::from_raw(255);
        assert_eq!(format!("{id:?}"), "SnowflakeId(255 (0x00000000000000ff))");
    }
}
