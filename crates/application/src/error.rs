//! Application error types

use tessera_domain::DomainError;
use thiserror::Error;

/// Errors raised by expression processors while evaluating a function call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The function was called with the wrong number of arguments.
    #[error(
        "The expected number of arguments for '{name}' expression is {expected}, but found {found} argument{}: '{arguments}'",
        plural_suffix(.found)
    )]
    InvalidArgumentCount {
        /// The function name.
        name: String,
        /// The expected number of arguments.
        expected: usize,
        /// The actual number of arguments.
        found: usize,
        /// The raw argument text.
        arguments: String,
    },

    /// The function failed to produce a value.
    #[error("{0}")]
    Evaluation(String),
}

fn plural_suffix(count: &usize) -> &'static str {
    if *count == 1 { "" } else { "s" }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// An expression processor failed; the step argument cannot be resolved.
    #[error("unable to process expression '{expression}': {source}")]
    Expression {
        /// The input text as it was passed to the expression resolver.
        expression: String,
        /// The processor failure.
        #[source]
        source: ExpressionError,
    },

    /// The resolved value could not be converted to the declared type.
    #[error("conversion error: {0}")]
    Conversion(#[from] DomainError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_argument_count_message() {
        let plural = ExpressionError::InvalidArgumentCount {
            name: "substringBefore".to_string(),
            expected: 2,
            found: 3,
            arguments: "1, 2, 3".to_string(),
        };
        assert_eq!(
            plural.to_string(),
            "The expected number of arguments for 'substringBefore' expression is 2, but found 3 arguments: '1, 2, 3'"
        );

        let singular = ExpressionError::InvalidArgumentCount {
            name: "substringAfter".to_string(),
            expected: 2,
            found: 1,
            arguments: "1".to_string(),
        };
        assert_eq!(
            singular.to_string(),
            "The expected number of arguments for 'substringAfter' expression is 2, but found 1 argument: '1'"
        );
    }

    #[test]
    fn test_expression_error_wraps_source() {
        let err = ApplicationError::Expression {
            expression: "#{fail()}".to_string(),
            source: ExpressionError::Evaluation("boom".to_string()),
        };
        assert_eq!(err.to_string(), "unable to process expression '#{fail()}': boom");
    }
}
