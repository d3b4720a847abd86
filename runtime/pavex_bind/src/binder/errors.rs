//! Errors that can occur while binding values onto a record.
use crate::coerce::CoercionError;
use crate::reflect::Kind;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`bind_data`](super::bind_data) when binding fails.
pub enum BindDataError {
    #[error("binding element must be a struct, but it is a `{kind}`")]
    /// The target is neither a record nor a map.
    ///
    /// This is a programmer error: the binder was pointed at a type it can't populate
    /// field by field.
    NotARecord {
        /// The kind of the target.
        kind: Kind,
    },
    #[error(transparent)]
    /// See [`FieldBindingError`] for details.
    Field(#[from] FieldBindingError),
}

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
#[non_exhaustive]
/// We failed to populate a specific field from its input value(s).
///
/// The error is displayed exactly as the underlying parsing or unmarshaling failure,
/// while the field details are kept around for diagnostics.
pub struct FieldBindingError {
    /// The name of the field, as declared in the source code.
    pub field: &'static str,
    /// The input name the value was read from.
    pub source_name: String,
    #[source]
    pub source: CoercionError,
}

impl FieldBindingError {
    pub(super) fn new(
        field: &'static str,
        source_name: &str,
        source: impl Into<CoercionError>,
    ) -> Self {
        Self {
            field,
            source_name: source_name.to_owned(),
            source: source.into(),
        }
    }
}
