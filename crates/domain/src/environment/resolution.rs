//! Layered variable store
//!
//! Holds all variable scopes of a run with proper precedence.

use super::key::{CompoundPath, VariableKey};
use super::variable::{ResolvedVariable, VariableMap, VariableScope};
use crate::value::Value;

/// Holds all variable scopes for resolution.
/// Variables are resolved in order of precedence (highest wins):
/// 1. Step (innermost running step frame first)
/// 2. Scenario
/// 3. Story
/// 4. Batch
/// 5. Default value embedded in the key (`name:default`)
/// 6. Process environment
///
/// `Null` values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    batch: VariableMap,
    story: VariableMap,
    scenario: VariableMap,
    step: Vec<VariableMap>,
}

impl Variables {
    /// Creates a new store with the given batch variables.
    #[must_use]
    pub fn new(batch: VariableMap) -> Self {
        Self {
            batch,
            ..Self::default()
        }
    }

    /// Resolves a variable key to its value and scope.
    /// Returns None if the variable is not found in any scope.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<ResolvedVariable> {
        let variable_key = VariableKey::parse(key);

        self.scopes()
            .find_map(|(scope, variables)| {
                lookup_in_scope(variables, &variable_key)
                    .map(|value| ResolvedVariable::new(key, value, scope))
            })
            .or_else(|| {
                variable_key
                    .default_value
                    .map(|default| ResolvedVariable::new(key, default, VariableScope::Default))
            })
            .or_else(|| {
                if key.trim().is_empty() || key.contains(['=', '\0']) {
                    return None;
                }
                std::env::var(key)
                    .ok()
                    .map(|value| ResolvedVariable::new(key, value, VariableScope::Environment))
            })
    }

    /// Resolves a variable key to just its value.
    #[must_use]
    pub fn get_variable(&self, key: &str) -> Option<Value> {
        self.resolve(key).map(|r| r.value)
    }

    /// Returns all variables merged by precedence (innermost scope wins).
    #[must_use]
    pub fn variables(&self) -> VariableMap {
        let mut merged = VariableMap::new();
        for (_, variables) in self.scopes().collect::<Vec<_>>().into_iter().rev() {
            merged.extend(variables.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Puts a variable into the given scope.
    ///
    /// `Default` and `Environment` are read-only sources; putting into them
    /// stores the value in the batch scope.
    pub fn put(&mut self, scope: VariableScope, key: impl Into<String>, value: impl Into<Value>) {
        let (key, value) = (key.into(), value.into());
        match scope {
            VariableScope::Step => self.put_step_variable(key, value),
            VariableScope::Scenario => self.put_scenario_variable(key, value),
            VariableScope::Story => self.put_story_variable(key, value),
            VariableScope::Batch | VariableScope::Default | VariableScope::Environment => {
                self.batch.insert(key, value);
            }
        }
    }

    /// Puts a variable into the innermost step frame, opening one if none is active.
    pub fn put_step_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if self.step.is_empty() {
            self.init_step_variables();
        }
        if let Some(frame) = self.step.last_mut() {
            frame.insert(key.into(), value.into());
        }
    }

    /// Puts a scenario variable.
    pub fn put_scenario_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.scenario.insert(key.into(), value.into());
    }

    /// Puts a story variable.
    pub fn put_story_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.story.insert(key.into(), value.into());
    }

    /// Opens a new step frame.
    pub fn init_step_variables(&mut self) {
        self.step.push(VariableMap::new());
    }

    /// Closes the innermost step frame, if any.
    pub fn clear_step_variables(&mut self) {
        self.step.pop();
    }

    /// Clears scenario variables.
    pub fn clear_scenario_variables(&mut self) {
        self.scenario.clear();
    }

    /// Clears story variables.
    pub fn clear_story_variables(&mut self) {
        self.story.clear();
    }

    fn scopes(&self) -> impl Iterator<Item = (VariableScope, &VariableMap)> {
        self.step
            .iter()
            .rev()
            .map(|frame| (VariableScope::Step, frame))
            .chain([
                (VariableScope::Scenario, &self.scenario),
                (VariableScope::Story, &self.story),
                (VariableScope::Batch, &self.batch),
            ])
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn lookup_in_scope(variables: &VariableMap, key: &VariableKey<'_>) -> Option<Value> {
    present(variables.get(key.key))
        .or_else(|| {
            key.has_default_value()
                .then(|| present(variables.get(key.name)))
                .flatten()
        })
        .cloned()
        .or_else(|| resolve_compound(&|name| present(variables.get(name)), key.key))
}

fn resolve_compound<'v>(lookup: &dyn Fn(&str) -> Option<&'v Value>, path: &str) -> Option<Value> {
    let path = CompoundPath::parse(path)?;
    let mut value = lookup(path.root)?;

    if let Some(index) = path.index
        && let Value::List(items) = value
    {
        value = present(items.get(index))?;
    }

    let Some(rest) = path.rest else {
        return Some(value.clone());
    };

    match value {
        Value::Map(map) => present(map.get(rest))
            .cloned()
            .or_else(|| resolve_compound(&|name| present(map.get(name)), rest)),
        other => Some(other.clone()),
    }
}
