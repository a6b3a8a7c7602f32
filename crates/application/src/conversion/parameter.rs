//! Step parameter conversion

use std::fmt;
use std::sync::Arc;

use tessera_domain::{Table, TypeDescriptor, Value};

use super::placeholder::PlaceholderResolver;
use crate::error::ApplicationResult;
use crate::ports::TypeConverter;

/// Turns a raw step argument into a value of the declared type.
#[derive(Clone)]
pub struct ParameterConverter {
    placeholders: PlaceholderResolver,
    converter: Arc<dyn TypeConverter>,
}

impl ParameterConverter {
    /// Creates a converter resolving with `placeholders` and parsing with `converter`.
    #[must_use]
    pub fn new(placeholders: PlaceholderResolver, converter: Arc<dyn TypeConverter>) -> Self {
        Self {
            placeholders,
            converter,
        }
    }

    /// Returns the placeholder resolver.
    #[must_use]
    pub const fn placeholders(&self) -> &PlaceholderResolver {
        &self.placeholders
    }

    /// Resolves and converts a raw argument.
    ///
    /// Sub-step arguments are passed to the converter untouched. Other
    /// arguments are resolved first; a resolved value that already satisfies
    /// the target is returned as is, anything else is stringified and parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression processor fails or the resolved
    /// text cannot be parsed into the target type.
    pub fn convert(&self, raw: &str, target: &TypeDescriptor) -> ApplicationResult<Value> {
        if *target == TypeDescriptor::SubSteps {
            return Ok(self.converter.convert(raw, target)?);
        }

        let resolved = self.placeholders.resolve(raw, target)?;
        if matches!(target, TypeDescriptor::Optional(_))
            && resolved.as_str().is_some_and(|text| text.trim().is_empty())
        {
            return Ok(Value::Null);
        }
        if resolved.is_null() || target.is_satisfied_by(&resolved) {
            return Ok(resolved);
        }

        let text = match resolved {
            Value::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            other => other.to_string(),
        };
        match self.convert_text(&text, target)? {
            Value::Table(table) => Ok(Value::Table(self.resolve_cells(table))),
            converted => Ok(converted),
        }
    }

    /// Resolves a raw argument without a declared type.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression processor fails.
    pub fn resolve(&self, raw: &str) -> ApplicationResult<Value> {
        self.convert(raw, &TypeDescriptor::Any)
    }

    fn convert_text(&self, text: &str, target: &TypeDescriptor) -> ApplicationResult<Value> {
        match target {
            TypeDescriptor::Optional(_) if text.trim().is_empty() => Ok(Value::Null),
            TypeDescriptor::Optional(inner) => self.convert_text(text, inner),
            _ => Ok(self.converter.convert(text, target)?),
        }
    }

    /// Re-runs placeholder resolution over every string cell.
    fn resolve_cells(&self, mut table: Table) -> Table {
        let variables = self.placeholders.variables();
        for row in table.rows_mut() {
            for cell in row.values_mut() {
                if let Value::String(text) = cell {
                    *cell = variables.resolve(text);
                }
            }
        }
        table
    }
}

impl fmt::Debug for ParameterConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterConverter")
            .field("placeholders", &self.placeholders)
            .finish_non_exhaustive()
    }
}
