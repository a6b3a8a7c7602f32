//! Named function expression processor
//!
//! Dispatches `name(arguments)` expressions to registered functions. Names
//! are matched case-insensitively.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tessera_application::ExpressionError;
use tessera_application::ports::ExpressionProcessor;
use tessera_domain::Value;
use tracing::trace;

use super::arguments::{parse_function_call, split_arguments};

/// Result of evaluating a function.
pub type FunctionResult = Result<Value, ExpressionError>;

type FunctionBody = dyn Fn(&[String]) -> FunctionResult + Send + Sync;

/// How the argument text of a call is passed to a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The whole argument text as a single argument, unsplit and untrimmed.
    Unary,
    /// Exactly this many split arguments.
    Exactly(usize),
    /// Any number of split arguments.
    Variadic,
}

#[derive(Clone)]
struct Function {
    name: String,
    arity: Arity,
    body: Arc<FunctionBody>,
}

/// Expression processor backed by a table of named functions.
#[derive(Clone, Default)]
pub struct FunctionExpressionProcessor {
    functions: HashMap<String, Function>,
}

impl FunctionExpressionProcessor {
    /// Creates a processor with no functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function taking the raw argument text.
    #[must_use]
    pub fn unary(
        self,
        name: &str,
        body: impl Fn(&str) -> FunctionResult + Send + Sync + 'static,
    ) -> Self {
        self.function(name, Arity::Unary, move |args: &[String]| {
            body(args.first().map_or("", String::as_str))
        })
    }

    /// Registers a function taking exactly `count` arguments.
    #[must_use]
    pub fn exactly(
        self,
        name: &str,
        count: usize,
        body: impl Fn(&[String]) -> FunctionResult + Send + Sync + 'static,
    ) -> Self {
        self.function(name, Arity::Exactly(count), body)
    }

    /// Registers a function taking any number of arguments.
    #[must_use]
    pub fn variadic(
        self,
        name: &str,
        body: impl Fn(&[String]) -> FunctionResult + Send + Sync + 'static,
    ) -> Self {
        self.function(name, Arity::Variadic, body)
    }

    fn function(
        mut self,
        name: &str,
        arity: Arity,
        body: impl Fn(&[String]) -> FunctionResult + Send + Sync + 'static,
    ) -> Self {
        self.functions.insert(
            name.to_lowercase(),
            Function {
                name: name.to_string(),
                arity,
                body: Arc::new(body),
            },
        );
        self
    }

    /// Adds every function of `other`, replacing functions with the same name.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.functions.extend(other.functions);
        self
    }

    /// Returns the registered function names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.values().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns true if a function with this name is registered.
    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }
}

impl ExpressionProcessor for FunctionExpressionProcessor {
    fn execute(&self, expression: &str) -> Result<Option<Value>, ExpressionError> {
        let Some(call) = parse_function_call(expression) else {
            return Ok(None);
        };
        let Some(function) = self.functions.get(&call.name.to_lowercase()) else {
            return Ok(None);
        };

        let arguments = match function.arity {
            Arity::Unary => vec![call.arguments.to_string()],
            Arity::Exactly(expected) => {
                let arguments = split_arguments(call.arguments);
                if arguments.len() != expected {
                    return Err(ExpressionError::InvalidArgumentCount {
                        name: function.name.clone(),
                        expected,
                        found: arguments.len(),
                        arguments: call.arguments.to_string(),
                    });
                }
                arguments
            }
            Arity::Variadic => split_arguments(call.arguments),
        };

        trace!(function = %function.name, ?arguments, "Evaluating expression function");
        (function.body)(&arguments).map(Some)
    }
}

impl fmt::Debug for FunctionExpressionProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionExpressionProcessor")
            .field("functions", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn processor() -> FunctionExpressionProcessor {
        FunctionExpressionProcessor::new()
            .unary("upper", |arg| Ok(Value::from(arg.to_uppercase())))
            .exactly("concat", 2, |args| Ok(Value::from(args.concat())))
            .variadic("count", |args| {
                Ok(Value::Integer(i64::try_from(args.len()).unwrap_or(i64::MAX)))
            })
    }

    #[test]
    fn test_unary_receives_raw_text() {
        assert_eq!(
            processor().execute("upper( a, b )").unwrap(),
            Some(Value::from(" A, B "))
        );
    }

    #[test]
    fn test_names_are_case_insensitive() {
        assert_eq!(processor().execute("UPPER(x)").unwrap(), Some(Value::from("X")));
        assert!(processor().supports("Concat"));
    }

    #[test]
    fn test_exact_arity() {
        assert_eq!(
            processor().execute("concat(a, b)").unwrap(),
            Some(Value::from("ab"))
        );

        let err = processor().execute("concat(a)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The expected number of arguments for 'concat' expression is 2, but found 1 argument: 'a'"
        );
    }

    #[test]
    fn test_variadic() {
        assert_eq!(
            processor().execute("count(a, b, c)").unwrap(),
            Some(Value::Integer(3))
        );
    }

    #[test]
    fn test_unknown_expressions_are_not_handled() {
        for expression in ["unknown(x)", "upper", "null", ""] {
            assert_eq!(processor().execute(expression).unwrap(), None, "{expression}");
        }
    }

    #[test]
    fn test_merge_and_names() {
        let merged = processor().merge(
            FunctionExpressionProcessor::new().unary("lower", |arg| Ok(Value::from(arg.to_lowercase()))),
        );
        assert_eq!(merged.names(), vec!["concat", "count", "lower", "upper"]);
    }
}
