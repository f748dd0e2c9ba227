use std::collections::TryReserveError;

/// Result type for list operations that take positions or allocate nodes.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by [`LinkedList`](crate::LinkedList) operations.
///
/// A call that returns an error leaves the list exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("position belongs to a different list")]
    ForeignPosition,

    #[error("position refers to an element that has been removed")]
    StalePosition,

    #[error("position is a list boundary and holds no element")]
    Boundary,

    #[error("end of range is not reachable from its start")]
    UnreachableRange,

    #[error("node allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}
