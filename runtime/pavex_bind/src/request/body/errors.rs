//! Errors that can occur while buffering or decoding the request body.
use http::StatusCode;
use ubyte::ByteUnit;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`BufferedBody::extract`] when buffering fails.
///
/// [`BufferedBody::extract`]: super::BufferedBody::extract
pub enum ExtractBufferedBodyError {
    #[error(transparent)]
    /// See [`SizeLimitExceeded`] for details.
    SizeLimitExceeded(#[from] SizeLimitExceeded),
    #[error(transparent)]
    /// See [`UnexpectedBufferError`] for details.
    UnexpectedBufferError(#[from] UnexpectedBufferError),
}

impl ExtractBufferedBodyError {
    /// The status code that best describes this failure to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExtractBufferedBodyError::SizeLimitExceeded(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ExtractBufferedBodyError::UnexpectedBufferError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert an [`ExtractBufferedBodyError`] into an HTTP response.
    pub fn into_response(&self) -> http::Response<String> {
        crate::request::errors::text_response(self.status_code(), self.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The request body is larger than the maximum size limit enforced by this server.")]
#[non_exhaustive]
/// The request body is larger than the maximum size limit enforced by this server.
pub struct SizeLimitExceeded {
    /// The maximum size limit enforced by this server.
    pub max_size: ByteUnit,
    /// The value of the `Content-Length` header for the request that breached the body
    /// size limit.
    ///
    /// It's set to `None` if the `Content-Length` header was missing or invalid.
    /// If it's set to `Some(n)` and `n` is smaller than `max_size`, then the request
    /// lied about the size of its body in the `Content-Length` header.
    pub content_length: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
#[error("Something went wrong while reading the request body.")]
#[non_exhaustive]
/// Something went wrong while reading the request body, but we don't know what specifically.
pub struct UnexpectedBufferError {
    #[source]
    pub(super) source: Box<dyn std::error::Error + Send + Sync>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The body claims to be JSON, but it can't be decoded into the target type.
pub enum DecodeJsonBodyError {
    #[error(transparent)]
    /// See [`JsonTypeMismatch`] for details.
    TypeMismatch(#[from] JsonTypeMismatch),
    #[error(transparent)]
    /// See [`JsonSyntaxError`] for details.
    Syntax(#[from] JsonSyntaxError),
    #[error(transparent)]
    /// See [`JsonDecodeError`] for details.
    Other(#[from] JsonDecodeError),
}

#[derive(Debug, thiserror::Error)]
#[error(
    "The JSON body doesn't match the expected shape at `{path}` (byte offset {offset}).\n{source}"
)]
#[non_exhaustive]
/// A well-formed JSON value has the wrong type for the field it's meant to populate.
pub struct JsonTypeMismatch {
    /// The path to the offending value, e.g. `address.city`.
    pub path: String,
    /// The line of the offending value, starting from 1.
    pub line: usize,
    /// The column of the offending value, starting from 1.
    pub column: usize,
    /// How many bytes into the body the offending value is.
    pub offset: usize,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, thiserror::Error)]
#[error("The body is not a well-formed JSON document (byte offset {offset}).\n{source}")]
#[non_exhaustive]
/// The body is not well-formed JSON: a syntax error, a premature end of input or
/// trailing characters after the document.
pub struct JsonSyntaxError {
    /// The line where decoding stopped, starting from 1.
    pub line: usize,
    /// The column where decoding stopped, starting from 1.
    pub column: usize,
    /// How many bytes into the body decoding stopped.
    pub offset: usize,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deserialize the body as a JSON document.\n{source}")]
#[non_exhaustive]
/// Something else went wrong when deserializing the body into the target type.
pub struct JsonDecodeError {
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The body claims to be XML, but it can't be decoded into the target type.
pub enum DecodeXmlBodyError {
    #[error(transparent)]
    /// See [`XmlUnsupportedType`] for details.
    UnsupportedType(#[from] XmlUnsupportedType),
    #[error(transparent)]
    /// See [`XmlSyntaxError`] for details.
    Syntax(#[from] XmlSyntaxError),
    #[error(transparent)]
    /// See [`XmlDecodeError`] for details.
    Other(#[from] XmlDecodeError),
}

#[derive(Debug, thiserror::Error)]
#[error("The XML body doesn't fit the expected type at `{path}`.\n{source}")]
#[non_exhaustive]
/// The XML document is well-formed, but it doesn't fit the target type.
pub struct XmlUnsupportedType {
    /// The path to the offending element, e.g. `address.city`.
    pub path: String,
    #[source]
    pub source: quick_xml::DeError,
}

#[derive(Debug, thiserror::Error)]
#[error("The body is not a well-formed XML document (line {line}).\n{source}")]
#[non_exhaustive]
/// The body is not well-formed XML.
pub struct XmlSyntaxError {
    /// The line where the document stops being well-formed, starting from 1.
    pub line: usize,
    #[source]
    pub source: quick_xml::DeError,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deserialize the body as an XML document.\n{source}")]
#[non_exhaustive]
/// Something else went wrong when deserializing the body into the target type.
pub struct XmlDecodeError {
    #[source]
    pub source: quick_xml::DeError,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The body claims to be a form, but it can't be parsed.
pub enum ParseFormError {
    #[error("The `Content-Type` of the multipart body doesn't specify a `boundary` parameter.")]
    /// `multipart/form-data` bodies can't be split into parts without a boundary.
    MissingBoundary,
    #[error("The multipart body is malformed: {reason}.")]
    /// The multipart body doesn't follow the expected framing.
    MalformedMultipart {
        /// What's wrong with the body.
        reason: &'static str,
    },
    #[error("The value of the `{name}` form field is not a well-formed UTF8 string.")]
    /// A text field in a multipart body is not valid UTF-8.
    InvalidUtf8 {
        /// The name of the offending field.
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
