//! Error types for repeat dispatch.

use thiserror::Error;

use crate::host::HostError;

/// Errors that can occur while replaying or wrapping a command.
///
/// Falling back to the host's native repeat is not an error; the only failure
/// is the host refusing the keys we hand it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepeatError {
    #[error(transparent)]
    Host(#[from] HostError),
}
