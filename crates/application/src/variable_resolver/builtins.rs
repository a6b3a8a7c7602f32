//! Built-in dynamic variables
//!
//! These variables generate a new value on each evaluation and are
//! referenced by kebab-case names, e.g. `${random-uuid}`. The camelCase
//! spelling (`${randomUuid}`) works through the bridge alias.

use std::sync::Arc;

use rand::Rng;
use tessera_domain::Value;
use uuid::Uuid;

use super::dynamic::DynamicVariables;
use crate::ports::Clock;

/// Information about a built-in variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinInfo {
    /// Variable name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Example output
    pub example: &'static str,
}

/// Generates values for built-in dynamic variables.
pub struct BuiltinVariables;

impl BuiltinVariables {
    /// Resolves a built-in variable name to a freshly generated value.
    /// Returns None if the name is not a recognized built-in.
    #[must_use]
    pub fn resolve(name: &str, clock: &dyn Clock) -> Option<Value> {
        match name {
            "random-uuid" => Some(Value::from(Self::generate_uuid())),
            "timestamp" => Some(Value::Integer(clock.now().timestamp())),
            "iso-timestamp" => Some(Value::from(clock.now().to_rfc3339())),
            "current-date" => Some(Value::from(clock.now().format("%Y-%m-%d").to_string())),
            "random-int" => Some(Value::Integer(Self::generate_random_int())),
            "random-string" => Some(Value::from(Self::random_alphanumeric_string(16))),
            "random-alphanumeric" => Some(Value::from(Self::random_alphanumeric_string(8))),
            "random-email" => Some(Value::from(Self::generate_random_email())),
            "random-boolean" => Some(Value::Bool(rand::rng().random_bool(0.5))),
            _ => None,
        }
    }

    /// Returns whether the name is a built-in variable.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        Self::available().iter().any(|b| b.name == name)
    }

    /// Registers every built-in variable into the registry.
    ///
    /// Date-based variables read the time from `clock`.
    pub fn register_all(registry: &mut DynamicVariables, clock: &Arc<dyn Clock>) {
        for info in Self::available() {
            let clock = Arc::clone(clock);
            let name = info.name;
            registry.register(name, move || {
                Self::resolve(name, clock.as_ref())
                    .ok_or_else(|| format!("'{name}' is not a built-in variable"))
            });
        }
    }

    /// Returns a list of all available built-in variable names with descriptions.
    #[must_use]
    pub fn available() -> Vec<BuiltinInfo> {
        vec![
            BuiltinInfo {
                name: "random-uuid",
                description: "Random UUID v4",
                example: "550e8400-e29b-41d4-a716-446655440000",
            },
            BuiltinInfo {
                name: "timestamp",
                description: "Unix timestamp in seconds",
                example: "1706284800",
            },
            BuiltinInfo {
                name: "iso-timestamp",
                description: "ISO 8601 timestamp (UTC)",
                example: "2024-01-26T12:00:00+00:00",
            },
            BuiltinInfo {
                name: "current-date",
                description: "Current date (YYYY-MM-DD)",
                example: "2024-01-26",
            },
            BuiltinInfo {
                name: "random-int",
                description: "Random integer 0-1000",
                example: "427",
            },
            BuiltinInfo {
                name: "random-string",
                description: "Random alphanumeric string (16 chars)",
                example: "aB3dE5fG7hI9jK1m",
            },
            BuiltinInfo {
                name: "random-alphanumeric",
                description: "Random alphanumeric string (8 chars)",
                example: "aB3dE5fG",
            },
            BuiltinInfo {
                name: "random-email",
                description: "Random email address",
                example: "abc12def@example.com",
            },
            BuiltinInfo {
                name: "random-boolean",
                description: "Random boolean (true/false)",
                example: "true",
            },
        ]
    }

    fn generate_uuid() -> String {
        Uuid::new_v4().to_string()
    }

    fn generate_random_int() -> i64 {
        rand::rng().random_range(0..=1000)
    }

    fn random_alphanumeric_string(len: usize) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::rng();
        (0..len)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    fn generate_random_email() -> String {
        let random_part = Self::random_alphanumeric_string(8).to_lowercase();
        format!("{random_part}@example.com")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 26, 12, 0, 0).unwrap())
    }

    fn resolve(name: &str) -> Value {
        BuiltinVariables::resolve(name, &clock()).expect("Should resolve built-in")
    }

    #[test]
    fn test_uuid_generation() {
        let uuid = resolve("random-uuid");
        assert!(Uuid::parse_str(uuid.as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_timestamp_uses_clock() {
        assert_eq!(resolve("timestamp"), Value::Integer(1_706_270_400));
    }

    #[test]
    fn test_iso_timestamp_uses_clock() {
        assert_eq!(resolve("iso-timestamp"), Value::from("2024-01-26T12:00:00+00:00"));
    }

    #[test]
    fn test_current_date_uses_clock() {
        assert_eq!(resolve("current-date"), Value::from("2024-01-26"));
    }

    #[test]
    fn test_random_int_generation() {
        let Value::Integer(value) = resolve("random-int") else {
            panic!("random-int should be an integer");
        };
        assert!((0..=1000).contains(&value));
    }

    #[test]
    fn test_random_string_generation() {
        let value = resolve("random-string");
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        assert_eq!(resolve("random-alphanumeric").as_str().unwrap().len(), 8);
    }

    #[test]
    fn test_random_email_generation() {
        let email = resolve("random-email");
        assert!(email.as_str().unwrap().ends_with("@example.com"));
    }

    #[test]
    fn test_random_boolean() {
        assert!(matches!(resolve("random-boolean"), Value::Bool(_)));
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(BuiltinVariables::resolve("unknown", &clock()).is_none());
        assert!(!BuiltinVariables::is_builtin("unknown"));
        assert!(BuiltinVariables::is_builtin("random-uuid"));
    }

    #[test]
    fn test_register_all() {
        let clock: Arc<dyn Clock> = Arc::new(clock());
        let mut registry = DynamicVariables::new();
        BuiltinVariables::register_all(&mut registry, &clock);

        assert_eq!(registry.len(), BuiltinVariables::available().len());
        let provider = registry.get("current-date").unwrap();
        assert_eq!(provider.calculate_value(), Ok(Value::from("2024-01-26")));
    }

    #[test]
    fn test_uniqueness() {
        assert_ne!(resolve("random-uuid"), resolve("random-uuid"));
    }
}
