//! Generic text-to-type converter

use tessera_application::ports::TypeConverter;
use tessera_domain::{DomainError, DomainResult, Table, TypeDescriptor, Value};

const LIST_SEPARATOR: char = ',';

/// Converts text into the declared type.
///
/// - `string`, `any` and `sub-steps` keep the text
/// - `integer`, `float` and `boolean` parse the trimmed text
/// - `bytes` take the UTF-8 bytes of the text
/// - `list<T>` accepts a JSON array or comma-separated items converted to `T`
/// - `map` accepts a JSON object
/// - `table` parses pipe-delimited table text
/// - `optional<T>` turns blank text into null
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeConverter;

impl DefaultTypeConverter {
    /// Creates a new converter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn convert_list(&self, value: &str, inner: &TypeDescriptor) -> DomainResult<Value> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Value::List(Vec::new()));
        }

        if trimmed.starts_with('[') {
            let target = TypeDescriptor::list_of(inner.clone());
            return match parse_json(value, &target)? {
                serde_json::Value::Array(items) => {
                    Ok(Value::List(items.into_iter().map(Value::from).collect()))
                }
                _ => Err(DomainError::conversion(value, &target, "not a JSON array")),
            };
        }

        trimmed
            .split(LIST_SEPARATOR)
            .map(|item| self.convert(item.trim(), inner))
            .collect::<DomainResult<Vec<_>>>()
            .map(Value::List)
    }
}

impl TypeConverter for DefaultTypeConverter {
    fn convert(&self, value: &str, target: &TypeDescriptor) -> DomainResult<Value> {
        match target {
            TypeDescriptor::String | TypeDescriptor::Any | TypeDescriptor::SubSteps => {
                Ok(Value::from(value))
            }
            TypeDescriptor::Integer => value
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| DomainError::conversion(value, target, e.to_string())),
            TypeDescriptor::Float => value
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| DomainError::conversion(value, target, e.to_string())),
            TypeDescriptor::Boolean => parse_bool(value.trim())
                .map(Value::Bool)
                .ok_or_else(|| DomainError::conversion(value, target, "expected true or false")),
            TypeDescriptor::Bytes => Ok(Value::Bytes(value.as_bytes().to_vec())),
            TypeDescriptor::List(inner) => self.convert_list(value, inner),
            TypeDescriptor::Map => match parse_json(value, target)? {
                object @ serde_json::Value::Object(_) => Ok(Value::from(object)),
                _ => Err(DomainError::conversion(value, target, "not a JSON object")),
            },
            TypeDescriptor::Table => Table::parse(value).map(Value::Table),
            TypeDescriptor::Optional(_) if value.trim().is_empty() => Ok(Value::Null),
            TypeDescriptor::Optional(inner) => self.convert(value, inner),
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_json(value: &str, target: &TypeDescriptor) -> DomainResult<serde_json::Value> {
    serde_json::from_str(value).map_err(|e| DomainError::conversion(value, target, e.to_string()))
}
