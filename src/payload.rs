use std::borrow::Cow;

use serde_json::Value;

use crate::error::Result;

/// How a recovered payload is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Raw,
    /// Wallet payloads are JSON documents; pretty-print them.
    Json,
}

pub fn render(text: &str, mode: RenderMode) -> Result<Cow<'_, str>> {
    match mode {
        RenderMode::Raw => Ok(Cow::Borrowed(text)),
        RenderMode::Json => {
            let value: Value = serde_json::from_str(text)?;
            Ok(Cow::Owned(serde_json::to_string_pretty(&value)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;

    #[test]
    fn test_raw_is_borrowed_verbatim() {
        let text = "not { json";
        let rendered = render(text, RenderMode::Raw).unwrap();
        assert!(matches!(rendered, Cow::Borrowed(_)));
        assert_eq!(rendered, text);
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let rendered = render(r#"{"hello":"world"}"#, RenderMode::Json).unwrap();
        assert_eq!(rendered, "{\n  \"hello\": \"world\"\n}");
    }

    #[test]
    fn test_json_rejects_non_json() {
        let result = render("You're a big guy.", RenderMode::Json);
        assert!(matches!(result, Err(WalletError::Json(_))));
    }
}
