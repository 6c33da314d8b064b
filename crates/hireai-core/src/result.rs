//! Convenience result type alias for HireAI.

use crate::error::AppError;

/// A specialized `Result` type for HireAI operations.
pub type AppResult<T> = Result<T, AppError>;
