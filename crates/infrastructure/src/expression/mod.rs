//! Expression processors
//!
//! Function-call processors for `#{name(arguments)}` expressions.

pub mod arguments;
pub mod encoding;
pub mod function;
pub mod null;
pub mod strings;

use std::sync::Arc;

use tessera_application::ports::ExpressionProcessor;

pub use arguments::{FunctionCall, parse_function_call, split_arguments};
pub use encoding::encoding_functions;
pub use function::{Arity, FunctionExpressionProcessor, FunctionResult};
pub use null::NullExpressionProcessor;
pub use strings::string_functions;

/// Returns the standard processors in query order: string functions,
/// encoding functions, then `null`.
#[must_use]
pub fn default_processors() -> Vec<Arc<dyn ExpressionProcessor>> {
    vec![
        Arc::new(string_functions()),
        Arc::new(encoding_functions()),
        Arc::new(NullExpressionProcessor),
    ]
}
