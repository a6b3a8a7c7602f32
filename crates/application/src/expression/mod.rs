//! Expression resolution module
//!
//! Resolves `#{function(args)}` calls. Span matching lives in [`matcher`];
//! evaluation against the registered processors lives in [`adaptor`].

pub mod adaptor;
pub mod matcher;

pub use adaptor::ExpressionAdaptor;
pub use matcher::{ExpressionMatch, MatchStrategy, find_greedy, find_reluctant};
