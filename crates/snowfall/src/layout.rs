use crate::{Error, Parts, Result, SnowflakeId};

/// Total bits available to the timestamp, datacenter, worker and sequence
/// fields. The most significant bit is reserved so IDs stay positive when read
/// as signed 64-bit integers.
const PAYLOAD_BITS: u8 = 63;

/// Bit widths of the fields packed into a [`SnowflakeId`].
///
/// The timestamp field receives whatever the other fields leave over:
///
/// ```text
///  Bit Index:  63           63 62                                                    0
///              +--------------+-----------+------------+--------+-----------------+
///  Field:      | reserved (1) | timestamp | datacenter | worker |    sequence     |
///              +--------------+-----------+------------+--------+-----------------+
///              |<----------- MSB ---------------- 64 bits --------------- LSB --->|
/// ```
///
/// [`Layout::DEFAULT`] uses 40 timestamp, 5 datacenter, 8 worker and 10
/// sequence bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLayout", into = "RawLayout"))]
pub struct Layout {
    sequence_bits: u8,
    worker_bits: u8,
    datacenter_bits: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layout {
    /// 40-bit timestamp, 5-bit datacenter, 8-bit worker, 10-bit sequence.
    ///
    /// 32 datacenters of 256 workers, each issuing up to 1024 IDs per
    /// millisecond.
    pub const DEFAULT: Self = Self {
        sequence_bits: 10,
        worker_bits: 8,
        datacenter_bits: 5,
    };

    /// The classic Twitter split: 41-bit timestamp, 5-bit datacenter, 5-bit
    /// worker, 12-bit sequence.
    pub const TWITTER: Self = Self {
        sequence_bits: 12,
        worker_bits: 5,
        datacenter_bits: 5,
    };

    /// Creates a layout from explicit field widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if the widths sum to more than 62,
    /// which would leave no bit for the timestamp.
    ///
    /// # Example
    /// ```
    /// use snowfall::Layout;
    ///
    /// let layout = Layout::new(12, 5, 5).unwrap();
    /// assert_eq!(layout, Layout::TWITTER);
    /// assert_eq!(layout.timestamp_bits(), 41);
    ///
    /// assert!(Layout::new(40, 20, 3).is_err());
    /// ```
    pub const fn new(sequence_bits: u8, worker_bits: u8, datacenter_bits: u8) -> Result<Self> {
        let used = sequence_bits as u16 + worker_bits as u16 + datacenter_bits as u16;
        if used >= PAYLOAD_BITS as u16 {
            return Err(Error::InvalidLayout {
                sequence_bits,
                worker_bits,
                datacenter_bits,
            });
        }
        Ok(Self {
            sequence_bits,
            worker_bits,
            datacenter_bits,
        })
    }

    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    pub const fn worker_bits(&self) -> u8 {
        self.worker_bits
    }

    pub const fn datacenter_bits(&self) -> u8 {
        self.datacenter_bits
    }

    /// Bits left over for the timestamp field.
    pub const fn timestamp_bits(&self) -> u8 {
        PAYLOAD_BITS - self.sequence_bits - self.worker_bits - self.datacenter_bits
    }

    /// Largest sequence value; also the mask applied when incrementing.
    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    pub const fn max_worker_id(&self) -> u64 {
        mask(self.worker_bits)
    }

    pub const fn max_datacenter_id(&self) -> u64 {
        mask(self.datacenter_bits)
    }

    /// Largest epoch-relative timestamp the layout can hold.
    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits())
    }

    pub const fn worker_shift(&self) -> u8 {
        self.sequence_bits
    }

    pub const fn datacenter_shift(&self) -> u8 {
        self.sequence_bits + self.worker_bits
    }

    pub const fn timestamp_shift(&self) -> u8 {
        self.sequence_bits + self.worker_bits + self.datacenter_bits
    }

    /// Packs the fields into an ID, most significant first: timestamp,
    /// datacenter, worker, sequence.
    ///
    /// `timestamp` is relative to the generator's epoch. Values wider than
    /// their field are truncated; debug builds assert against that.
    pub fn compose(
        &self,
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> SnowflakeId {
        debug_assert!(timestamp <= self.max_timestamp(), "timestamp overflow");
        debug_assert!(
            datacenter_id <= self.max_datacenter_id(),
            "datacenter_id overflow"
        );
        debug_assert!(worker_id <= self.max_worker_id(), "worker_id overflow");
        debug_assert!(sequence <= self.max_sequence(), "sequence overflow");

        let timestamp = (timestamp & self.max_timestamp()) << self.timestamp_shift();
        let datacenter_id = (datacenter_id & self.max_datacenter_id()) << self.datacenter_shift();
        let worker_id = (worker_id & self.max_worker_id()) << self.worker_shift();
        let sequence = sequence & self.max_sequence();
        SnowflakeId::from_raw(timestamp | datacenter_id | worker_id | sequence)
    }

    /// Splits an ID back into its fields.
    ///
    /// # Example
    /// ```
    /// use snowfall::Layout;
    ///
    /// let layout = Layout::DEFAULT;
    /// let id = layout.compose(1_000, 3, 7, 42);
    /// let parts = layout.decompose(id);
    /// assert_eq!(parts.timestamp, 1_000);
    /// assert_eq!(parts.datacenter_id, 3);
    /// assert_eq!(parts.worker_id, 7);
    /// assert_eq!(parts.sequence, 42);
    /// ```
    pub const fn decompose(&self, id: SnowflakeId) -> Parts {
        let raw = id.to_raw();
        Parts {
            timestamp: (raw >> self.timestamp_shift()) & self.max_timestamp(),
            datacenter_id: (raw >> self.datacenter_shift()) & self.max_datacenter_id(),
            worker_id: (raw >> self.worker_shift()) & self.max_worker_id(),
            sequence: raw & self.max_sequence(),
        }
    }
}

const fn mask(bits: u8) -> u64 {
    if bits == 0 {
        0
    } else {
        u64::MAX >> (64 - bits as u32)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawLayout {
    sequence_bits: u8,
    worker_bits: u8,
    datacenter_bits: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLayout> for Layout {
    type Error = Error;

    fn try_from(raw: RawLayout) -> Result<Self> {
        Self::new(raw.sequence_bits, raw.worker_bits, raw.datacenter_bits)
    }
}

#[cfg(feature = "serde")]
impl From<Layout> for RawLayout {
    fn from(layout: Layout) -> Self {
        Self {
            sequence_bits: layout.sequence_bits,
            worker_bits: layout.worker_bits,
            datacenter_bits: layout.datacenter_bits,
        }
    }
}
