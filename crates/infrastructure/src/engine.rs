//! Engine composition root
//!
//! Wires the variable store, dynamic variables, expression processors and
//! type converter into a ready-to-use [`Engine`].

use std::sync::Arc;

use parking_lot::RwLock;
use tessera_application::expression::ExpressionAdaptor;
use tessera_application::ports::{
    Clock, DynamicVariable, ExpressionProcessor, TypeConverter, VariableStore,
};
use tessera_application::variable_resolver::{
    BuiltinVariables, DynamicVariableBridge, DynamicVariables, VariableResolver,
};
use tessera_application::{ApplicationResult, ParameterConverter, PlaceholderResolver};
use tessera_domain::{ResolverSettings, TypeDescriptor, Value, Variables};

use crate::adapters::SystemClock;
use crate::config::EngineConfig;
use crate::conversion::DefaultTypeConverter;
use crate::expression::default_processors;

/// The assembled resolution engine.
#[derive(Debug, Clone)]
pub struct Engine {
    parameters: ParameterConverter,
    variables: Arc<RwLock<Variables>>,
    settings: ResolverSettings,
}

impl Engine {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Resolves and converts a raw step argument to the target type.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression fails or the value cannot be converted.
    pub fn convert(&self, raw: &str, target: &TypeDescriptor) -> ApplicationResult<Value> {
        self.parameters.convert(raw, target)
    }

    /// Resolves a raw value without a declared type.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression fails.
    pub fn resolve(&self, raw: &str) -> ApplicationResult<Value> {
        self.parameters.resolve(raw)
    }

    /// Returns the shared variable store, for updating scopes between steps.
    #[must_use]
    pub const fn variables(&self) -> &Arc<RwLock<Variables>> {
        &self.variables
    }

    /// Returns the parameter converter.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterConverter {
        &self.parameters
    }

    /// Returns the settings the engine was built with.
    #[must_use]
    pub const fn settings(&self) -> ResolverSettings {
        self.settings
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    settings: ResolverSettings,
    variables: Variables,
    dynamic: DynamicVariables,
    builtins: bool,
    clock: Arc<dyn Clock>,
    processors: Vec<Arc<dyn ExpressionProcessor>>,
    default_processors: bool,
    converter: Arc<dyn TypeConverter>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            settings: ResolverSettings::default(),
            variables: Variables::default(),
            dynamic: DynamicVariables::new(),
            builtins: true,
            clock: Arc::new(SystemClock::new()),
            processors: Vec::new(),
            default_processors: true,
            converter: Arc::new(DefaultTypeConverter::new()),
        }
    }
}

impl EngineBuilder {
    /// Starts from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::default()
            .settings(config.settings)
            .variables(config.to_variables())
    }

    /// Sets the resolver settings.
    #[must_use]
    pub fn settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the initial variables.
    #[must_use]
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Adds a dynamic variable.
    #[must_use]
    pub fn dynamic_variable(
        mut self,
        name: impl Into<String>,
        provider: impl DynamicVariable + 'static,
    ) -> Self {
        self.dynamic.register(name, provider);
        self
    }

    /// Leaves out the built-in dynamic variables.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Sets the clock read by date-based built-in variables.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Adds an expression processor. Added processors are queried before
    /// the standard ones, in the order they were added.
    #[must_use]
    pub fn processor(mut self, processor: Arc<dyn ExpressionProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Leaves out the standard expression processors.
    #[must_use]
    pub fn without_default_processors(mut self) -> Self {
        self.default_processors = false;
        self
    }

    /// Sets the generic type converter.
    #[must_use]
    pub fn converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        let mut registry = DynamicVariables::new();
        if self.builtins {
            BuiltinVariables::register_all(&mut registry, &self.clock);
        }
        // Explicitly registered variables replace built-ins of the same name
        registry.merge(self.dynamic);

        let mut processors = self.processors;
        if self.default_processors {
            processors.extend(default_processors());
        }

        let variables = Arc::new(RwLock::new(self.variables));
        let store = Arc::clone(&variables) as Arc<dyn VariableStore>;

        let placeholders = PlaceholderResolver::new(
            VariableResolver::new(store, DynamicVariableBridge::new(registry, self.settings)),
            ExpressionAdaptor::new(processors, self.settings),
            self.settings,
        );

        Engine {
            parameters: ParameterConverter::new(placeholders, self.converter),
            variables,
            settings: self.settings,
        }
    }
}
