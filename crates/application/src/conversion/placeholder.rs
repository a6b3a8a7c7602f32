//! Depth-bounded placeholder and expression resolution

use tessera_domain::{ResolverSettings, TypeDescriptor, Value};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::expression::ExpressionAdaptor;
use crate::variable_resolver::VariableResolver;

/// Placeholder result that stands for an absent value.
pub const NULL_EXPRESSION: &str = "#{null}";

/// Alternates placeholder and expression resolution until the text settles.
#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    variables: VariableResolver,
    expressions: ExpressionAdaptor,
    settings: ResolverSettings,
}

impl PlaceholderResolver {
    /// Creates a resolver from its two passes.
    #[must_use]
    pub const fn new(
        variables: VariableResolver,
        expressions: ExpressionAdaptor,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            variables,
            expressions,
            settings,
        }
    }

    /// Returns the placeholder pass.
    #[must_use]
    pub const fn variables(&self) -> &VariableResolver {
        &self.variables
    }

    /// Returns the expression pass.
    #[must_use]
    pub const fn expressions(&self) -> &ExpressionAdaptor {
        &self.expressions
    }

    /// Resolves placeholders and expressions in `value` for the given target.
    ///
    /// Passes repeat while they change the text. When `max_depth` passes
    /// have all changed it, the result of a single pass over the original
    /// text is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression processor fails.
    pub fn resolve(&self, value: &str, target: &TypeDescriptor) -> ApplicationResult<Value> {
        let mut current = value.to_string();

        for _ in 0..self.settings.max_depth {
            match self.resolve_once(&current, target)? {
                Value::String(resolved) if resolved != current => current = resolved,
                resolved => return Ok(resolved),
            }
        }

        debug!(
            value,
            max_depth = self.settings.max_depth,
            "Resolution depth exhausted, resolving the original value once"
        );
        self.resolve_once(value, target)
    }

    fn resolve_once(&self, current: &str, target: &TypeDescriptor) -> ApplicationResult<Value> {
        let adapted = self.variables.resolve(current);
        if adapted.as_str() == Some(NULL_EXPRESSION) {
            return Ok(Value::Null);
        }

        if *target == TypeDescriptor::String || adapted.is_string() {
            let text = match adapted {
                Value::String(text) => text,
                Value::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                other => other.to_string(),
            };
            return self.expressions.process_raw(&text);
        }

        Ok(adapted)
    }
}
