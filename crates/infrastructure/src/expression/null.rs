//! The `null` expression

use tessera_application::ExpressionError;
use tessera_application::ports::ExpressionProcessor;
use tessera_domain::Value;

const NULL_KEYWORD: &str = "null";

/// Evaluates `#{null}` to an absent value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExpressionProcessor;

impl ExpressionProcessor for NullExpressionProcessor {
    fn execute(&self, expression: &str) -> Result<Option<Value>, ExpressionError> {
        Ok((expression == NULL_KEYWORD).then_some(Value::Null))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_keyword() {
        assert_eq!(NullExpressionProcessor.execute("null").unwrap(), Some(Value::Null));
        assert_eq!(NullExpressionProcessor.execute("NULL").unwrap(), None);
        assert_eq!(NullExpressionProcessor.execute("null()").unwrap(), None);
    }
}
