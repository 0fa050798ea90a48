//! Coordination-free, time-ordered 64-bit Snowflake IDs.
//!
//! Each ID packs, from most to least significant bit: a reserved zero bit, the
//! milliseconds elapsed since a configured epoch, a datacenter ID, a worker ID
//! and a per-millisecond sequence. Generators with distinct
//! `(datacenter_id, worker_id)` pairs never collide, and a single generator
//! only ever hands out strictly increasing IDs.
//!
//! ```
//! use snowfall::{LockSnowflakeGenerator, SnowflakeGenerator, SystemClock, DEFAULT_EPOCH};
//!
//! let generator = LockSnowflakeGenerator::new(1, 7, DEFAULT_EPOCH, SystemClock)?;
//! let id = generator.next_id()?;
//!
//! let parts = generator.decompose(id);
//! assert_eq!(parts.datacenter_id, 1);
//! assert_eq!(parts.worker_id, 7);
//! # Ok::<(), snowfall::Error>(())
//! ```
//!
//! If the wall clock moves backwards, generation fails with
//! [`Error::ClockRolledBack`] instead of risking duplicates; what to do next is
//! the caller's decision.

mod config;
mod error;
mod generator;
mod global;
mod id;
mod layout;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::global::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::time::*;
