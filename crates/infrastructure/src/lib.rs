//! Tessera Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the standard expression functions,
//! configuration loading and the [`Engine`] that wires them together.

pub mod adapters;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod expression;

pub use adapters::SystemClock;
pub use config::{ConfigFormat, EngineConfig};
pub use conversion::DefaultTypeConverter;
pub use engine::{Engine, EngineBuilder};
pub use error::{InfrastructureError, InfrastructureResult};
pub use expression::{
    FunctionExpressionProcessor, NullExpressionProcessor, default_processors, encoding_functions,
    string_functions,
};
