//! Best-effort query results.
//!
//! Dashboard views never fail because a collaborator did. Each query result
//! is folded into a [`Fetched`], which either carries the real value or a
//! zero value together with the cause of the degradation.

use std::fmt::Display;

/// Outcome of a best-effort query.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The query answered.
    Ok(T),
    /// The query failed and `value` is the substitute.
    Degraded { value: T, cause: String },
}

impl<T> Fetched<T> {
    /// Fold a result, substituting `fallback` and logging on failure.
    pub fn or<E: Display>(result: Result<T, E>, fallback: T, context: &str) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => {
                tracing::warn!(error = %e, "{} failed, showing partial data", context);
                Self::Degraded {
                    value: fallback,
                    cause: e.to_string(),
                }
            }
        }
    }

    /// Whether the value is a substitute.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Why the query degraded, if it did.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => value,
        }
    }

}

impl<T: Default> Fetched<T> {
    /// Fold a result, substituting the zero value on failure.
    pub fn from_result<E: Display>(result: Result<T, E>, context: &str) -> Self {
        Self::or(result, T::default(), context)
    }
}
