//! Error types for document rendering.
//!
//! This module provides [`RenderError`], the single error type returned by
//! every fallible rendering operation. Missing field values are never errors:
//! the function library substitutes empty text for them instead.

/// Error type for rendering operations.
///
/// Every variant is fatal for the render call that produced it. No partial
/// output is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A fragment referenced a name that is not registered.
    #[error("undefined fragment: {0}")]
    UndefinedFragment(String),

    /// Two fragments were registered under the same name.
    #[error("duplicate fragment: {0}")]
    DuplicateFragment(String),

    /// Fragment logic could not be evaluated against the current scope.
    #[error("template evaluation error: {0}")]
    TemplateEvaluation(String),

    /// No output format is registered under the requested key.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

impl RenderError {
    /// Create a template evaluation error.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::TemplateEvaluation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::UndefinedFragment("foo".to_string());
        assert!(err.to_string().contains("undefined fragment"));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_evaluation_helper() {
        let err = RenderError::evaluation("expected an input record");
        assert_eq!(
            err,
            RenderError::TemplateEvaluation("expected an input record".into())
        );
        assert_eq!(
            err.to_string(),
            "template evaluation error: expected an input record"
        );
    }
}
