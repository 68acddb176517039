/// The outcome of a single, non-blocking attempt to generate an ID.
///
/// This type models the result of [`IdGenerator::poll_id`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was generated.
/// - [`IdGenStatus::Pending`] means the sequence for the current millisecond
///   is exhausted and no ID can be produced until the clock advances.
///
/// # Example
///
/// ```
/// use snowgen::{IdGenStatus, IdGenerator};
///
/// let generator = IdGenerator::new(1, 1).unwrap();
/// let id = loop {
///     match generator.poll_id().unwrap() {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert!(id > 0);
/// ```
///
/// [`IdGenerator::poll_id`]: crate::IdGenerator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: i64,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current millisecond.
    Pending {
        /// Milliseconds to wait before the next attempt can succeed.
        yield_for: u64,
    },
}
