//! Parse form bodies into [`SourceValues`].
//!
//! `application/x-www-form-urlencoded` bodies are decoded with `form_urlencoded`.
//! `multipart/form-data` bodies are split using the `boundary` parameter of the
//! `Content-Type` header: text parts become values, file uploads are ignored.
//!
//! The query parameters of the request are part of the form as well.
use percent_encoding::percent_decode_str;

use crate::binder::SourceValues;

use super::errors::ParseFormError;
use super::{BodyFormat, MULTIPART_FORM_DATA};

/// Parse a form body, using `content_type` to pick the encoding, and merge it with
/// the `query` values of the request.
///
/// Urlencoded body values come before the query values.
/// Multipart fields come after them.
pub(crate) fn parse_form(
    content_type: &str,
    bytes: &[u8],
    query: &SourceValues,
) -> Result<SourceValues, ParseFormError> {
    if BodyFormat::has_prefix(content_type, MULTIPART_FORM_DATA) {
        let mut values = query.clone();
        parse_multipart(content_type, bytes, &mut values)?;
        Ok(values)
    } else {
        let mut values: SourceValues = form_urlencoded::parse(bytes).collect();
        values.merge(query);
        Ok(values)
    }
}

fn parse_multipart(
    content_type: &str,
    bytes: &[u8],
    values: &mut SourceValues,
) -> Result<(), ParseFormError> {
    let mime: mime::Mime = content_type
        .parse()
        .map_err(|_| ParseFormError::MissingBoundary)?;
    let boundary = mime
        .get_param(mime::BOUNDARY)
        .ok_or(ParseFormError::MissingBoundary)?;
    let delimiter = format!("--{}", boundary.as_str());
    let part_end = format!("\r\n{delimiter}");

    let malformed = |reason| ParseFormError::MalformedMultipart { reason };

    let start = find(bytes, delimiter.as_bytes()).ok_or(malformed("missing opening boundary"))?;
    let mut rest = &bytes[start + delimiter.len()..];
    loop {
        if rest.starts_with(b"--") {
            // Closing delimiter, anything after it is an epilogue.
            break;
        }
        rest = rest
            .strip_prefix(b"\r\n")
            .ok_or(malformed("boundary not followed by a line break"))?;
        let end = find(rest, part_end.as_bytes()).ok_or(malformed("missing closing boundary"))?;
        let part = &rest[..end];
        rest = &rest[end + part_end.len()..];

        let (headers, body) = split_part(part).ok_or(malformed("part without a header section"))?;
        let disposition = headers
            .split("\r\n")
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-disposition"))
            .map(|(_, value)| value)
            .ok_or(malformed("part without a `Content-Disposition` header"))?;
        let params = DispositionParams::parse(disposition);
        if params.get("filename").is_some() {
            tracing::trace!("Ignoring a file upload in a multipart body");
            continue;
        }
        let name = params
            .get("name")
            .ok_or(malformed("part without a field name"))?;
        match String::from_utf8(body.to_vec()) {
            Ok(value) => values.append(name, value),
            Err(source) => return Err(ParseFormError::InvalidUtf8 { name, source }),
        }
    }
    Ok(())
}

/// Split a part into its header section and its body.
fn split_part(part: &[u8]) -> Option<(&str, &[u8])> {
    if let Some(body) = part.strip_prefix(b"\r\n") {
        return Some(("", body));
    }
    let separator = find(part, b"\r\n\r\n")?;
    let headers = std::str::from_utf8(&part[..separator]).ok()?;
    Some((headers, &part[separator + 4..]))
}

/// The parameters of a `Content-Disposition` header value, e.g. `form-data; name="age"`.
///
/// Keys are lowercased. Quoted values are unescaped, and separators inside quotes
/// are part of the value.
struct DispositionParams(Vec<(String, String)>);

impl DispositionParams {
    fn parse(value: &str) -> Self {
        let mut params = Vec::new();
        // Skip the disposition type.
        let Some((_, mut rest)) = value.split_once(';') else {
            return Self(params);
        };
        loop {
            rest = rest.trim_start_matches([' ', '\t', ';']);
            let Some(separator) = rest.find(['=', ';']) else {
                break;
            };
            if rest[separator..].starts_with(';') {
                // A parameter without a value.
                rest = &rest[separator..];
                continue;
            }
            let key = rest[..separator].trim().to_ascii_lowercase();
            rest = rest[separator + 1..].trim_start();
            let value = if let Some(quoted) = rest.strip_prefix('"') {
                let (value, remainder) = unquote(quoted);
                rest = remainder;
                value
            } else {
                let end = rest.find(';').unwrap_or(rest.len());
                let value = rest[..end].trim().to_owned();
                rest = &rest[end..];
                value
            };
            params.push((key, value));
        }
        Self(params)
    }

    /// The value of `key`.
    ///
    /// The extended `key*` form (RFC 5987, e.g. `name*=UTF-8''caf%C3%A9`) wins over the
    /// plain one, as long as it can be decoded.
    fn get(&self, key: &str) -> Option<String> {
        let extended = format!("{key}*");
        self.0
            .iter()
            .find(|(k, _)| *k == extended)
            .and_then(|(_, value)| decode_extended(value))
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, value)| value.clone())
            })
    }
}

/// Read a quoted string, up to its closing quote, resolving backslash escapes.
///
/// Returns the unescaped value and whatever follows the closing quote.
fn unquote(quoted: &str) -> (String, &str) {
    let mut value = String::new();
    let mut escaped = false;
    for (i, c) in quoted.char_indices() {
        match c {
            _ if escaped => {
                value.push(c);
                escaped = false;
            }
            '\\' => escaped = true,
            '"' => return (value, &quoted[i + 1..]),
            _ => value.push(c),
        }
    }
    (value, "")
}

/// Decode an RFC 5987 extended value: `charset'language'percent-encoded-value`.
///
/// Only UTF-8 (and its ASCII subset) is supported.
fn decode_extended(value: &str) -> Option<String> {
    let mut pieces = value.splitn(3, '\'');
    let charset = pieces.next()?;
    let _language = pieces.next()?;
    let encoded = pieces.next()?;
    if !(charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("us-ascii")) {
        return None;
    }
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
