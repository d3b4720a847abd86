//! The query string of the incoming request.
use crate::binder::SourceValues;

use super::RequestHead;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The query parameters of the incoming request, decoded as
/// `application/x-www-form-urlencoded`.
///
/// Repeated names accumulate values: `?tag=a&tag=b` binds `tag` to `["a", "b"]`.
pub struct QueryParams(SourceValues);

impl QueryParams {
    /// Decode the query string of the request target.
    pub fn extract(request_head: &RequestHead) -> Self {
        Self::parse(request_head.query())
    }

    /// Decode a raw query string, without the leading `?`.
    pub fn parse(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).collect())
    }

    pub fn values(&self) -> &SourceValues {
        &self.0
    }

    pub fn into_values(self) -> SourceValues {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_strings_are_percent_decoded() {
        let query = QueryParams::parse("name=Ada%20Lovelace&tag=a&tag=b&empty=");
        let values = query.values();
        assert_eq!(values.get("name"), Some(&["Ada Lovelace".to_string()][..]));
        assert_eq!(values.get("tag").map(<[String]>::len), Some(2));
        assert_eq!(values.get("empty"), Some(&[String::new()][..]));
    }

    #[test]
    fn empty_query_strings_have_no_values() {
        assert!(QueryParams::parse("").values().is_empty());
    }
}
