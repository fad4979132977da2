use thiserror::Error;

use crate::parse::SyntaxError;
use crate::{PerformingError, PropertyError};

/// Unified error type covering parsing, performing, and I/O.
///
/// Returned by convenience methods like
/// [`Ruleset::from_file()`](crate::Ruleset::from_file).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Performing(#[from] PerformingError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
