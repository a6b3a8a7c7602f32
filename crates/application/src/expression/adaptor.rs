//! Expression resolution
//!
//! Evaluates `#{...}` spans with an ordered list of processors, innermost
//! expressions first.

use std::fmt;
use std::sync::Arc;

use tessera_domain::{ResolverSettings, Value};
use tracing::{debug, error};

use super::matcher::MatchStrategy;
use crate::error::{ApplicationError, ApplicationResult, ExpressionError};
use crate::ports::ExpressionProcessor;

/// Resolves expressions in text using pluggable processors.
#[derive(Clone)]
pub struct ExpressionAdaptor {
    processors: Vec<Arc<dyn ExpressionProcessor>>,
    settings: ResolverSettings,
}

impl ExpressionAdaptor {
    /// Creates an adaptor querying `processors` in order.
    #[must_use]
    pub fn new(processors: Vec<Arc<dyn ExpressionProcessor>>, settings: ResolverSettings) -> Self {
        Self {
            processors,
            settings,
        }
    }

    /// Returns true if expressions are left unevaluated.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.settings.dry_run
    }

    /// Returns the processors in query order.
    #[must_use]
    pub fn processors(&self) -> &[Arc<dyn ExpressionProcessor>] {
        &self.processors
    }

    /// Resolves every expression in `input`, including nested ones.
    ///
    /// If the whole input is a single expression whose result is not a
    /// string, the typed value is returned. Unrecognized expressions are
    /// left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Expression`] if a processor fails.
    pub fn process_raw(&self, input: &str) -> ApplicationResult<Value> {
        if self.is_dry_run() {
            debug!(input, "Dry run: expressions are not evaluated");
            return Ok(Value::from(input));
        }
        self.process_expressions(input)
            .map_err(|source| failure(input, source))
    }

    /// Evaluates a single expression given without the `#{}` wrapper.
    ///
    /// Nested expressions are not resolved. If no processor recognizes the
    /// text, it is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Expression`] if a processor fails.
    pub fn process_shallow(&self, expression: &str) -> ApplicationResult<Value> {
        if self.is_dry_run() {
            return Ok(Value::from(expression));
        }
        match self.apply(expression) {
            Ok(value) => Ok(value.unwrap_or_else(|| Value::from(expression))),
            Err(source) => Err(failure(expression, source)),
        }
    }

    /// Queries the processors in order; the first `Some` wins.
    ///
    /// # Errors
    ///
    /// Returns the first processor error.
    pub fn apply(&self, expression: &str) -> Result<Option<Value>, ExpressionError> {
        for processor in &self.processors {
            if let Some(value) = processor.execute(expression)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Alternates the reluctant and greedy strategies until neither changes
    /// the text.
    fn process_expressions(&self, input: &str) -> Result<Value, ExpressionError> {
        let mut current = input.to_string();
        loop {
            let reluctant = match self.process_with(&current, MatchStrategy::Reluctant)? {
                Value::String(text) => text,
                typed => return Ok(typed),
            };
            match self.process_with(&reluctant, MatchStrategy::Greedy)? {
                Value::String(greedy) if greedy == reluctant => return Ok(Value::String(greedy)),
                Value::String(greedy) => current = greedy,
                typed => return Ok(typed),
            }
        }
    }

    /// Replaces matches pass after pass until the text stops changing.
    fn process_with(&self, input: &str, strategy: MatchStrategy) -> Result<Value, ExpressionError> {
        let mut current = input.to_string();

        loop {
            let mut output = String::with_capacity(current.len());
            let mut last_end = 0;

            while let Some(found) = strategy.find(&current, last_end) {
                let content = found.content_in(&current);
                match self.apply(content)? {
                    Some(result) if found.covers(&current) && !result.is_string() => {
                        return Ok(result);
                    }
                    Some(result) => {
                        output.push_str(&current[last_end..found.span.start]);
                        output.push_str(&result.to_string());
                    }
                    None => output.push_str(&current[last_end..found.span.end]),
                }
                last_end = found.span.end;
            }
            output.push_str(&current[last_end..]);

            if output == current {
                return Ok(Value::String(current));
            }
            current = output;
        }
    }
}

fn failure(input: &str, source: ExpressionError) -> ApplicationError {
    error!(error = %source, "Unable to process expression '{input}'");
    ApplicationError::Expression {
        expression: input.to_string(),
        source,
    }
}

impl fmt::Debug for ExpressionAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionAdaptor")
            .field("processors", &self.processors.len())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    /// Test processor answering to a fixed set of expressions and recording calls.
    #[derive(Default)]
    pub(crate) struct RecordingProcessor {
        answers: Vec<(String, Result<Value, ExpressionError>)>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingProcessor {
        pub(crate) fn answering(mut self, expression: &str, value: impl Into<Value>) -> Self {
            self.answers.push((expression.to_string(), Ok(value.into())));
            self
        }

        pub(crate) fn failing(mut self, expression: &str, message: &str) -> Self {
            self.answers.push((
                expression.to_string(),
                Err(ExpressionError::Evaluation(message.to_string())),
            ));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl ExpressionProcessor for RecordingProcessor {
        fn execute(&self, expression: &str) -> Result<Option<Value>, ExpressionError> {
            self.calls.lock().push(expression.to_string());
            self.answers
                .iter()
                .find(|(known, _)| known == expression)
                .map(|(_, answer)| answer.clone())
                .transpose()
        }
    }

    fn adaptor(processors: Vec<Arc<RecordingProcessor>>) -> ExpressionAdaptor {
        let processors = processors
            .into_iter()
            .map(|p| p as Arc<dyn ExpressionProcessor>)
            .collect();
        ExpressionAdaptor::new(processors, ResolverSettings::default())
    }

    #[test]
    fn test_simple_expression() {
        let target = Arc::new(RecordingProcessor::default().answering("target", "result"));
        let adaptor = adaptor(vec![Arc::clone(&target)]);

        assert_eq!(adaptor.process_raw("#{target}").unwrap(), Value::from("result"));
        assert_eq!(target.calls(), vec!["target"]);
    }

    #[test]
    fn test_several_expressions_in_text() {
        let target = Arc::new(RecordingProcessor::default().answering("target", "R"));
        let adaptor = adaptor(vec![Arc::clone(&target)]);

        assert_eq!(
            adaptor.process_raw("{#{target} and #{target}}").unwrap(),
            Value::from("{R and R}")
        );
    }

    #[test]
    fn test_values_in_table_text() {
        let target = Arc::new(
            RecordingProcessor::default()
                .answering("target", "target")
                .answering("tar\nget", "target")
                .answering("target (something inside#$)", "target"),
        );
        let adaptor = adaptor(vec![Arc::clone(&target)]);
        let input = "|#{target}|simple|#{target}|#{tar\nget}|\n\
                     |#{target (something inside#$)}|simple|#{target}|#{tar\nget}|";

        assert_eq!(
            adaptor.process_raw(input).unwrap(),
            Value::from("|target|simple|target|target|\n|target|simple|target|target|")
        );
        assert_eq!(target.calls().len(), 6);
    }

    #[test]
    fn test_brace_inside_call() {
        let target = Arc::new(RecordingProcessor::default().answering("target(})", "ok"));
        let adaptor = adaptor(vec![Arc::clone(&target)]);
        assert_eq!(adaptor.process_raw("#{target(})}").unwrap(), Value::from("ok"));
    }

    #[test]
    fn test_nested_expressions_innermost_first() {
        let expr = Arc::new(
            RecordingProcessor::default().answering("expr(value{1})", "value{1}"));
        let adaptor = adaptor(vec![Arc::clone(&expr)]);

        assert_eq!(
            adaptor
                .process_raw("#{expr(#{expr(#{expr(value{1})})})}")
                .unwrap(),
            Value::from("value{1}")
        );
        assert_eq!(expr.calls(), vec!["expr(value{1})"; 3]);
    }

    #[test]
    fn test_typed_result_of_whole_expression() {
        let mut object = tessera_domain::ValueMap::new();
        object.insert("key".to_string(), Value::from("value"));
        let processor = Arc::new(
            RecordingProcessor::default()
                .answering("string()", "str")
                .answering("object(str)", Value::Map(object.clone())),
        );
        let adaptor = adaptor(vec![processor]);

        assert_eq!(
            adaptor.process_raw("#{object(#{string()})}").unwrap(),
            Value::Map(object)
        );
    }

    #[test]
    fn test_typed_result_inside_text_is_stringified() {
        let processor =
            Arc::new(RecordingProcessor::default().answering("integer()", Value::Integer(42)));
        let adaptor = adaptor(vec![processor]);

        assert_eq!(
            adaptor.process_raw("24 + #{integer()}").unwrap(),
            Value::from("24 + 42")
        );
    }

    #[test]
    fn test_unrecognized_outer_keeps_inner_result() {
        let processor = Arc::new(RecordingProcessor::default().answering("integer()", 42i64));
        let adaptor = adaptor(vec![processor]);

        assert_eq!(
            adaptor.process_raw("'#{string(#{integer()})}'").unwrap(),
            Value::from("'#{string(42)}'")
        );
    }

    #[test]
    fn test_unsupported_expression_asks_each_processor_once_per_strategy() {
        let first = Arc::new(RecordingProcessor::default());
        let second = Arc::new(RecordingProcessor::default());
        let adaptor = adaptor(vec![Arc::clone(&first), Arc::clone(&second)]);

        assert_eq!(
            adaptor.process_raw("#{unsupported}").unwrap(),
            Value::from("#{unsupported}")
        );
        assert_eq!(first.calls(), vec!["unsupported", "unsupported"]);
        assert_eq!(second.calls(), vec!["unsupported", "unsupported"]);
    }

    #[test]
    fn test_first_processor_wins() {
        let first = Arc::new(RecordingProcessor::default().answering("target", "first"));
        let second = Arc::new(RecordingProcessor::default().answering("target", "second"));
        let adaptor = adaptor(vec![Arc::clone(&first), Arc::clone(&second)]);

        assert_eq!(adaptor.process_raw("#{target}").unwrap(), Value::from("first"));
        assert!(second.calls().is_empty());
    }

    #[test]
    fn test_greedy_fallback() {
        let processor = Arc::new(
            RecordingProcessor::default().answering("wrap(a)} and (b)", "wrapped"),
        );
        let adaptor = adaptor(vec![Arc::clone(&processor)]);

        assert_eq!(
            adaptor.process_raw("#{wrap(a)} and (b)}").unwrap(),
            Value::from("wrapped")
        );
        assert_eq!(processor.calls(), vec!["wrap(a)", "wrap(a)} and (b)"]);
    }

    #[test]
    fn test_greedy_span_after_resolved_expression() {
        let processor = Arc::new(
            RecordingProcessor::default()
                .answering("a()", "A")
                .answering("wrap(x)} and (y)", "W"),
        );
        let adaptor = adaptor(vec![processor]);

        assert_eq!(
            adaptor.process_raw("#{wrap(x)} and (y)}").unwrap(),
            Value::from("W")
        );
        assert_eq!(
            adaptor.process_raw("#{a()} #{wrap(x)} and (y)}").unwrap(),
            Value::from("A W")
        );
    }

    #[test]
    fn test_reluctant_resumes_after_greedy_substitution() {
        let processor = Arc::new(
            RecordingProcessor::default()
                .answering("wrap(x)} and (y)", "#{p(1)} and (2)}")
                .answering("p(1)", "P"),
        );
        let adaptor = adaptor(vec![processor]);

        assert_eq!(
            adaptor.process_raw("[#{wrap(x)} and (y)}]").unwrap(),
            Value::from("[P and (2)}]")
        );
    }

    #[test]
    fn test_inner_expression_runs_before_outer() {
        let processor = Arc::new(
            RecordingProcessor::default()
                .answering("inner()", "r")
                .answering("outer(r)", "done"),
        );
        let adaptor = adaptor(vec![Arc::clone(&processor)]);

        assert_eq!(
            adaptor.process_raw("#{outer(#{inner()})}").unwrap(),
            Value::from("done")
        );
        assert_eq!(processor.calls(), vec!["inner()", "outer(r)"]);
    }

    #[test]
    fn test_dry_run_returns_input() {
        let processor = Arc::new(RecordingProcessor::default().answering("target", "result"));
        let adaptor = ExpressionAdaptor::new(
            vec![Arc::clone(&processor) as Arc<dyn ExpressionProcessor>],
            ResolverSettings::dry_run(),
        );

        assert!(adaptor.is_dry_run());
        assert_eq!(adaptor.process_raw("#{target}").unwrap(), Value::from("#{target}"));
        assert!(processor.calls().is_empty());
    }

    #[test]
    fn test_processor_error_propagates_with_original_input() {
        let processor = Arc::new(RecordingProcessor::default().failing("fail()", "boom"));
        let adaptor = adaptor(vec![processor]);

        let err = adaptor.process_raw("value: #{fail()}").unwrap_err();
        match err {
            ApplicationError::Expression { expression, source } => {
                assert_eq!(expression, "value: #{fail()}");
                assert_eq!(source, ExpressionError::Evaluation("boom".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_process_shallow() {
        let processor = Arc::new(RecordingProcessor::default().answering("target", "result"));
        let adaptor = adaptor(vec![processor]);

        assert_eq!(adaptor.process_shallow("target").unwrap(), Value::from("result"));
        assert_eq!(adaptor.process_shallow("other").unwrap(), Value::from("other"));
    }

    #[test]
    fn test_text_without_expressions() {
        let processor = Arc::new(RecordingProcessor::default());
        let adaptor = adaptor(vec![Arc::clone(&processor)]);

        assert_eq!(
            adaptor.process_raw("|#{target}|${variable}|").unwrap(),
            Value::from("|#{target}|${variable}|")
        );
        assert_eq!(adaptor.process_raw("plain").unwrap(), Value::from("plain"));
        assert!(processor.calls().iter().all(|c| c == "target"));
    }
}
