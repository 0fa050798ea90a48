use crate::SnowflakeId;

/// The outcome of one non-blocking generation attempt.
///
/// Returned by [`SnowflakeGenerator::try_poll_id`]:
///
/// - [`Poll::Ready`] carries a freshly issued ID.
/// - [`Poll::Pending`] means every sequence value of the current millisecond
///   has been issued. Nothing changed; try again once the clock reaches
///   `yield_until`.
///
/// # Example
///
/// ```
/// use snowfall::{BasicSnowflakeGenerator, Poll, SnowflakeGenerator, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let generator = BasicSnowflakeGenerator::new(0, 0, 0, FixedTime).unwrap();
/// match generator.try_poll_id().unwrap() {
///     Poll::Ready { id } => println!("ID: {id}"),
///     Poll::Pending { yield_until } => println!("Back off until: {yield_until}"),
/// }
/// ```
///
/// [`SnowflakeGenerator::try_poll_id`]: crate::SnowflakeGenerator::try_poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// The sequence is exhausted for the current millisecond.
    Pending {
        /// The first Unix millisecond at which an ID can be issued again.
        yield_until: u64,
    },
}
