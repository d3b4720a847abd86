use quick_xml::DeError;
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;

use super::errors::{DecodeXmlBodyError, XmlDecodeError, XmlSyntaxError, XmlUnsupportedType};

/// Decode an XML document into a fresh `T`.
///
/// The name of the root element is ignored.
pub(crate) fn decode_xml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeXmlBodyError> {
    let mut deserializer = quick_xml::de::Deserializer::from_reader(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().to_string();
        match e.into_inner() {
            source @ (DeError::InvalidXml(_) | DeError::UnexpectedEof) => XmlSyntaxError {
                line: syntax_error_line(bytes),
                source,
            }
            .into(),
            source @ DeError::Custom(_) => XmlUnsupportedType { path, source }.into(),
            source => XmlDecodeError { source }.into(),
        }
    })
}

/// Find the line where `bytes` stops being well-formed XML.
///
/// The deserializer doesn't track positions, so the document is scanned again
/// with a bare reader. If the reader doesn't spot the problem, the last line is
/// returned.
fn syntax_error_line(bytes: &[u8]) -> usize {
    let mut reader = Reader::from_reader(bytes);
    let position = loop {
        match reader.read_event() {
            Ok(Event::Eof) => break bytes.len(),
            Ok(_) => {}
            Err(_) => break reader.buffer_position() as usize,
        }
    };
    line_number(bytes, position)
}

fn line_number(bytes: &[u8], position: usize) -> usize {
    let end = position.min(bytes.len());
    1 + bytes[..end].iter().filter(|b| **b == b'\n').count()
}
