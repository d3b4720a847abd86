use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Where the values being bound come from.
///
/// Each namespace resolves field names independently: a field can be populated
/// from `user_id` in the query string and from `id` in the path.
pub enum Namespace {
    /// The fields of a URL-encoded or multipart form body.
    Form,
    /// The query string of the request URL.
    Query,
    /// The path parameters extracted by the router.
    Param,
}

impl Namespace {
    /// The name of the namespace, as used in `#[bind(...)]` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Form => "form",
            Namespace::Query => "query",
            Namespace::Param => "param",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
