pub mod error;
pub mod form;
pub mod format;
pub mod time_value;
pub mod types;
mod validate;

#[cfg(feature = "swp")]
pub mod swp;

#[cfg(feature = "wealth")]
pub mod wealth;

pub use error::CorpusError;
pub use types::*;

/// Standard result type for all projection operations
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Longest projection horizon accepted by any engine, in years.
pub const MAX_DURATION_YEARS: u32 = 100;
