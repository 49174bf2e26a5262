//! Main Crate Error

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Kadnet crate error enum.
pub enum Error {
    /// A store or retrieve was attempted on a [crate::Network] without members,
    /// so there is no entry point to start a lookup from.
    #[error("Network has no members to route through")]
    EmptyNetwork,

    /// Tried to build an [crate::Id] from a byte slice of the wrong length.
    #[error("Invalid Id size, expected 20, got {0}")]
    InvalidIdSize(usize),

    /// Tried to parse an [crate::Id] from a string that is not 40 hex characters.
    #[error("Invalid Id encoding: {0}")]
    InvalidIdEncoding(String),
}

/// Alias for `Result<T, kadnet::Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
