//! Read-Failure Fallback Policy
//!
//! The original admin panel silently swapped demo data in whenever a read
//! failed, everywhere, unconditionally. Here that behavior is an explicit
//! policy injected into each service: `DemoData` preserves it, `Live`
//! turns it off so production callers see the real error. Tests can
//! assert on either mode directly.

use crate::error::ApiError;

/// What a domain service does when a read operation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Propagate the error to the caller
    Live,
    /// Substitute the fixed demo dataset for the failed read
    #[default]
    DemoData,
}

impl FallbackPolicy {
    /// Resolve a failed read: either the demo substitute or the error.
    pub fn on_read_failure<T>(
        &self,
        err: ApiError,
        demo: impl FnOnce() -> T,
    ) -> Result<T, ApiError> {
        match self {
            FallbackPolicy::Live => Err(err),
            FallbackPolicy::DemoData => {
                tracing::debug!(error = %err, "read failed, substituting demo data");
                Ok(demo())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data_substitutes() {
        let result = FallbackPolicy::DemoData
            .on_read_failure(ApiError::transport("down"), || vec![1, 2, 3]);
        assert_eq!(result.expect("demo value"), vec![1, 2, 3]);
    }

    #[test]
    fn test_live_propagates() {
        let result: Result<Vec<i32>, _> =
            FallbackPolicy::Live.on_read_failure(ApiError::transport("down"), || vec![1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_is_demo_data() {
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::DemoData);
    }
}
