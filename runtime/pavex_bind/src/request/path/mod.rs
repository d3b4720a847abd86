//! The path parameters captured by your router for the current request.
use percent_encoding::percent_decode_str;

use crate::binder::SourceValues;

pub use errors::DecodeError;

pub mod errors;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The path parameters of the incoming request, as `(name, value)` pairs in the order
/// they appear in the route template.
///
/// Values are expected to be percent-decoded already.
/// Use [`PathParams::from_encoded`] if your router hands out raw URL segments.
///
/// # Example
///
/// ```rust
/// use pavex_bind::request::path::PathParams;
///
/// // Route: `/users/{id}/posts/{slug}`
/// // Path: `/users/42/posts/hello%20world`
/// let params = PathParams::from_encoded([("id", "42"), ("slug", "hello%20world")]).unwrap();
/// assert_eq!(params.get("slug"), Some("hello world"));
/// ```
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// No path parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent-decode raw path segments.
    pub fn from_encoded<'a, I>(raw: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        raw.into_iter()
            .map(|(key, raw_value)| {
                let value = percent_decode_str(raw_value)
                    .decode_utf8()
                    .map_err(|e| DecodeError {
                        invalid_key: key.to_owned(),
                        invalid_raw_segment: raw_value.to_owned(),
                        source: e,
                    })?;
                Ok((key.to_owned(), value.into_owned()))
            })
            .collect()
    }

    /// Add a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// The value of the parameter called `name`.
    ///
    /// If the name appears more than once, the last value is returned.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// One value per name: a name that appears twice keeps its last value.
    pub(crate) fn to_source_values(&self) -> SourceValues {
        let mut values = SourceValues::new();
        for (name, value) in self.iter() {
            values.set(name, value);
        }
        values
    }
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
