use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::errors::{DecodeJsonBodyError, JsonDecodeError, JsonSyntaxError, JsonTypeMismatch};

/// Decode a JSON document into a fresh `T`.
///
/// Trailing characters after the document are rejected.
pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeJsonBodyError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().to_string();
        classify(bytes, Some(path), e.into_inner())
    })?;
    deserializer.end().map_err(|e| classify(bytes, None, e))?;
    Ok(value)
}

fn classify(bytes: &[u8], path: Option<String>, source: serde_json::Error) -> DecodeJsonBodyError {
    let (line, column) = (source.line(), source.column());
    let offset = byte_offset(bytes, line, column);
    match source.classify() {
        Category::Data => JsonTypeMismatch {
            path: path.unwrap_or_else(|| ".".to_owned()),
            line,
            column,
            offset,
            source,
        }
        .into(),
        Category::Syntax | Category::Eof => JsonSyntaxError {
            line,
            column,
            offset,
            source,
        }
        .into(),
        Category::Io => JsonDecodeError { source }.into(),
    }
}

/// Convert a 1-based line and column into an offset from the start of `bytes`.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map_or(bytes.len(), |(i, _)| i + 1)
    };
    (line_start + column).min(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Person {
        name: String,
        address: Address,
    }

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Address {
        zip: u32,
    }

    #[test]
    fn type_mismatches_point_at_the_offending_field() {
        let body = br#"{"name": "Ada", "address": {"zip": "abc"}}"#;
        let err = decode_json::<Person>(body).unwrap_err();
        let DecodeJsonBodyError::TypeMismatch(err) = err else {
            panic!("Expected a type mismatch, got {err:?}");
        };
        assert_eq!(err.path, "address.zip");
        assert_eq!(err.line, 1);
        assert_eq!(err.offset, err.column);
    }

    #[test]
    fn offsets_account_for_previous_lines() {
        let body = b"{\n  \"name\": 42,\n  \"address\": {\"zip\": 1}\n}";
        let DecodeJsonBodyError::TypeMismatch(err) = decode_json::<Person>(body).unwrap_err()
        else {
            panic!("Expected a type mismatch");
        };
        assert_eq!(err.path, "name");
        assert_eq!(err.line, 2);
        assert_eq!(err.offset, 2 + err.column);
    }

    #[test]
    fn malformed_documents_are_syntax_errors() {
        let err = decode_json::<Person>(br#"{"name": "Ada",, }"#).unwrap_err();
        assert!(matches!(err, DecodeJsonBodyError::Syntax(_)), "{err:?}");

        let err = decode_json::<Person>(br#"{"name": "Ada""#).unwrap_err();
        assert!(matches!(err, DecodeJsonBodyError::Syntax(_)), "{err:?}");
    }

    #[test]
    fn trailing_characters_are_rejected() {
        let body = br#"{"name": "Ada", "address": {"zip": 1}} {}"#;
        let err = decode_json::<Person>(body).unwrap_err();
        let DecodeJsonBodyError::Syntax(err) = err else {
            panic!("Expected a syntax error, got {err:?}");
        };
        assert!(err.offset > 0);
    }

    #[test]
    fn offsets_never_exceed_the_body() {
        assert_eq!(byte_offset(b"ab", 1, 10), 2);
        assert_eq!(byte_offset(b"a\nbc", 2, 1), 3);
        assert_eq!(byte_offset(b"a\nbc", 5, 1), 4);
        assert_eq!(byte_offset(b"", 0, 0), 0);
    }
}
