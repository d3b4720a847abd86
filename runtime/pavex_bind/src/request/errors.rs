//! Errors that can occur while binding an incoming request.
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};

use crate::binder::{BindDataError, Namespace};

use super::body::errors::{DecodeJsonBodyError, DecodeXmlBodyError, ParseFormError};

/// The error returned by [`bind`](crate::bind) when binding fails.
///
/// Every failure is the caller's fault (4xx): the request doesn't fit the target type,
/// or it uses an encoding the binder doesn't support.
/// The underlying failure is available via [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BindError {
    #[error(transparent)]
    /// See [`DecodeJsonBodyError`] for details.
    Json(#[from] DecodeJsonBodyError),
    #[error(transparent)]
    /// See [`DecodeXmlBodyError`] for details.
    Xml(#[from] DecodeXmlBodyError),
    #[error(transparent)]
    /// See [`ParseFormError`] for details.
    Form(#[from] ParseFormError),
    #[error(transparent)]
    /// See [`BindingError`] for details.
    Binding(#[from] BindingError),
    #[error(transparent)]
    /// See [`UnsupportedMediaType`] for details.
    UnsupportedMediaType(#[from] UnsupportedMediaType),
}

impl BindError {
    /// `415 Unsupported Media Type` for bodies the binder can't decode,
    /// `400 Bad Request` for everything else.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BindError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            BindError::Json(_) | BindError::Xml(_) | BindError::Form(_) | BindError::Binding(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Convert a [`BindError`] into an HTTP response.
    pub fn into_response(&self) -> http::Response<String> {
        let mut body = String::new();
        self.response_body(&mut body)
            .expect("Failed to write into a string buffer");
        text_response(self.status_code(), body)
    }

    /// Write the body of the response for this error into `writer`.
    ///
    /// Unsupported media types get an empty body.
    pub fn response_body<W: std::fmt::Write>(&self, writer: &mut W) -> std::fmt::Result {
        match self {
            BindError::UnsupportedMediaType(_) => Ok(()),
            _ => write!(writer, "{self}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
#[non_exhaustive]
/// Form, query or path values couldn't be bound onto the target.
pub struct BindingError {
    /// Where the values came from.
    pub namespace: Namespace,
    #[source]
    pub source: BindDataError,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "The `Content-Type` header was set to `{actual}`. Supported body encodings are JSON, XML, \
    `application/x-www-form-urlencoded` and `multipart/form-data`"
)]
#[non_exhaustive]
/// The body is encoded in a format the binder doesn't support.
pub struct UnsupportedMediaType {
    /// The actual value of the `Content-Type` header for this request.
    pub actual: String,
}

/// A response with `body` as plain text, if non-empty.
pub(crate) fn text_response(status: StatusCode, body: String) -> http::Response<String> {
    let has_body = !body.is_empty();
    let mut response = http::Response::new(body);
    *response.status_mut() = status;
    if has_body {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
    }
    response
}
