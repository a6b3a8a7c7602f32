//! Variable scope types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A collection of variables keyed by name.
pub type VariableMap = HashMap<String, Value>;

/// Defines the scope/origin of a variable for resolution precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Process environment variables - lowest precedence
    Environment = 0,
    /// Default value embedded in the variable key (`name:default`)
    Default = 1,
    /// Variables shared by every story of a batch
    Batch = 2,
    /// Variables visible to the whole story
    Story = 3,
    /// Variables visible to the current scenario
    Scenario = 4,
    /// Variables of the innermost running step - highest precedence
    Step = 5,
}

impl VariableScope {
    /// Returns the precedence level (higher = takes priority).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable name for the scope.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Environment => "Environment",
            Self::Default => "Default",
            Self::Batch => "Batch",
            Self::Story => "Story",
            Self::Scenario => "Scenario",
            Self::Step => "Step",
        }
    }
}

/// A resolved variable with its value and origin scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    /// The variable key as requested (without `${ }`).
    pub name: String,
    /// The resolved value.
    pub value: Value,
    /// The scope from which this value was resolved.
    pub scope: VariableScope,
}

impl ResolvedVariable {
    /// Creates a new resolved variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>, scope: VariableScope) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope,
        }
    }
}
