use http::{HeaderMap, Method, Uri, Version};

#[non_exhaustive]
#[derive(Debug)]
/// All the information that is transmitted as part of an HTTP request ahead of the body.
///
/// It includes the [method](Method), the [target](Uri),
/// the [HTTP version](Version), and the [headers](HeaderMap).
///
/// The binder reads the `Content-Type` and `Content-Length` headers from it,
/// as well as the query string of the request target.
pub struct RequestHead {
    /// The HTTP method of the request.
    pub method: Method,
    /// The [target](https://datatracker.ietf.org/doc/html/rfc7230#section-5.3) of the request.
    pub target: Uri,
    /// The HTTP version used by the request.
    pub version: Version,
    /// The headers attached to the request.
    pub headers: HeaderMap,
}

impl RequestHead {
    /// The raw query string of the request target, without the leading `?`.
    ///
    /// It's empty if the request target has no query.
    pub fn query(&self) -> &str {
        self.target.query().unwrap_or_default()
    }

    /// The value of the `Content-Length` header, if it's present and well-formed.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(http::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok()?.parse::<u64>().ok())
    }
}

impl From<http::request::Parts> for RequestHead {
    fn from(parts: http::request::Parts) -> Self {
        Self {
            method: parts.method,
            target: parts.uri,
            version: parts.version,
            headers: parts.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_and_content_length_are_read_from_the_head() {
        let request = http::Request::post("/search?q=rust")
            .header("Content-Length", "12")
            .body(())
            .unwrap();
        let head = RequestHead::from(request.into_parts().0);
        assert_eq!(head.method, Method::POST);
        assert_eq!(head.query(), "q=rust");
        assert_eq!(head.content_length(), Some(12));

        let request = http::Request::get("/").header("Content-Length", "n/a").body(()).unwrap();
        let head = RequestHead::from(request.into_parts().0);
        assert_eq!(head.query(), "");
        assert_eq!(head.content_length(), None);
    }
}
