//! Base64 encoding functions

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tessera_application::ExpressionError;
use tessera_domain::Value;

use super::function::FunctionExpressionProcessor;

/// Creates a processor with `encodeToBase64` and `decodeFromBase64`.
#[must_use]
pub fn encoding_functions() -> FunctionExpressionProcessor {
    FunctionExpressionProcessor::new()
        .unary("encodeToBase64", |arg| Ok(Value::from(STANDARD.encode(arg.as_bytes()))))
        .unary("decodeFromBase64", |arg| {
            let bytes = STANDARD.decode(arg.trim()).map_err(|e| {
                ExpressionError::Evaluation(format!("Unable to decode '{arg}' from Base64: {e}"))
            })?;
            Ok(Value::from(String::from_utf8_lossy(&bytes).into_owned()))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tessera_application::ports::ExpressionProcessor;

    #[test]
    fn test_encode_to_base64() {
        assert_eq!(
            encoding_functions().execute("encodeToBase64(user:pass)").unwrap(),
            Some(Value::from("dXNlcjpwYXNz"))
        );
    }

    #[test]
    fn test_decode_from_base64() {
        assert_eq!(
            encoding_functions().execute("decodeFromBase64(dXNlcjpwYXNz)").unwrap(),
            Some(Value::from("user:pass"))
        );
    }

    #[test]
    fn test_decode_invalid_input() {
        let err = encoding_functions()
            .execute("decodeFromBase64(not base64!)")
            .unwrap_err();
        assert!(matches!(err, ExpressionError::Evaluation(_)));
        assert!(err.to_string().starts_with("Unable to decode 'not base64!' from Base64"));
    }
}
