//! Buffer the request body and decode it according to its `Content-Type`.
pub use buffered_body::BufferedBody;
pub use limit::BodySizeLimit;

pub(crate) use form::parse_form;
pub(crate) use json::decode_json;
pub(crate) use xml::decode_xml;

mod buffered_body;
pub mod errors;
mod form;
mod json;
mod limit;
mod xml;

pub(crate) const APPLICATION_JSON: &str = "application/json";
const APPLICATION_XML: &str = "application/xml";
const TEXT_XML: &str = "text/xml";
const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The body encodings the binder knows how to decode.
pub(crate) enum BodyFormat {
    Json,
    Xml,
    Form,
}

impl BodyFormat {
    /// Pick a format by matching `content_type` against the supported MIME types.
    ///
    /// Parameters, such as `charset`, are ignored.
    pub(crate) fn detect(content_type: &str) -> Option<Self> {
        if Self::has_prefix(content_type, APPLICATION_JSON) {
            Some(Self::Json)
        } else if Self::has_prefix(content_type, APPLICATION_XML)
            || Self::has_prefix(content_type, TEXT_XML)
        {
            Some(Self::Xml)
        } else if Self::has_prefix(content_type, APPLICATION_FORM_URLENCODED)
            || Self::has_prefix(content_type, MULTIPART_FORM_DATA)
        {
            Some(Self::Form)
        } else {
            None
        }
    }

    fn has_prefix(content_type: &str, mime_type: &str) -> bool {
        content_type
            .get(..mime_type.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::BodyFormat;

    #[test]
    fn formats_are_detected_by_prefix() {
        let cases = [
            ("application/json", Some(BodyFormat::Json)),
            ("application/json; charset=utf-8", Some(BodyFormat::Json)),
            ("Application/JSON", Some(BodyFormat::Json)),
            ("application/xml", Some(BodyFormat::Xml)),
            ("text/xml; charset=utf-8", Some(BodyFormat::Xml)),
            ("application/x-www-form-urlencoded", Some(BodyFormat::Form)),
            ("multipart/form-data; boundary=x", Some(BodyFormat::Form)),
            ("application/octet-stream", None),
            ("text/plain", None),
            ("json", None),
        ];
        for (content_type, expected) in cases {
            assert_eq!(BodyFormat::detect(content_type), expected, "{content_type}");
        }
    }
}
