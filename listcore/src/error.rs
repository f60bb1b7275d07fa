/// Fatal precondition violations.
///
/// Every check runs before the engine mutates anything, so an `Err` leaves the previous state
/// intact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("data source must contain at least one entry")]
    EmptyDataSource,
    #[error("entry {index} has no key; every entry of an infinite list needs a unique key")]
    MissingIdentity { index: usize },
    #[error("entry {index} repeats a key used earlier in the data source")]
    DuplicateKey { index: usize },
    #[error("key is not present in the data source")]
    UnknownKey,
    #[error("window size must be at least 1")]
    ZeroWindowSize,
}
