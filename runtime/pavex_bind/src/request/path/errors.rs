//! Errors that can happen when decoding path parameters.
use std::str::Utf8Error;

/// The error returned by [`PathParams::from_encoded`] when one of the percent-decoded
/// path parameters is not a valid UTF8 string.
///
/// Path parameters must be percent-encoded whenever they contain characters that are not
/// URL safe, e.g. whitespaces.
///
/// # Example
///
/// One of your routes is `/address/{address_id}`.
/// A request for `/address/the%20street` sets `address_id` to `the street`.
/// A request for `/address/dirty%DE~%C7%1FY`, instead, fails with this error:
/// the decoded bytes can't be interpreted as a well-formed UTF8 string.
///
/// [`PathParams::from_encoded`]: super::PathParams::from_encoded
#[derive(Debug, thiserror::Error)]
#[error(
    "`{invalid_raw_segment}` cannot be used as `{invalid_key}` \
since it is not a well-formed UTF8 string when percent-decoded"
)]
#[non_exhaustive]
pub struct DecodeError {
    /// The name of the offending parameter.
    pub invalid_key: String,
    /// The raw value of the offending parameter, before decoding.
    pub invalid_raw_segment: String,
    #[source]
    pub source: Utf8Error,
}
