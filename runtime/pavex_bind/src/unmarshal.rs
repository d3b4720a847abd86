//! Let types parse themselves from the raw input, bypassing the built-in coercion rules.
use crate::reflect::{Bind, Shape};

/// A boxed error, as returned by custom unmarshaling logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type that can populate itself from a single query, path or form parameter.
///
/// When a type exposes this capability (via [`Bind::as_unmarshal_param`]), the binder
/// hands it the raw value instead of using the built-in coercion rules, even if the type
/// would otherwise look like an integer, a string, etc.
///
/// Implementing this trait is not enough: the capability must be exposed by
/// [`Bind::as_unmarshal_param`], either by hand or via `#[bind(unmarshal_param)]`
/// on `#[derive(Bind)]`.
pub trait UnmarshalParam {
    /// Parse `param` and update `self` accordingly.
    fn unmarshal_param(&mut self, param: &str) -> Result<(), BoxError>;
}

/// A type that can populate itself from a textual representation.
///
/// It's only consulted if the type doesn't expose [`UnmarshalParam`].
pub trait UnmarshalText {
    /// Parse `text` and update `self` accordingly.
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError>;
}

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
#[non_exhaustive]
/// A custom [`UnmarshalParam`] or [`UnmarshalText`] implementation rejected its input.
pub struct UnmarshalError {
    /// The value that was rejected.
    pub value: String,
    #[source]
    pub source: BoxError,
}

/// Give `value` a chance to parse `text` on its own terms.
///
/// It returns:
///
/// - `Ok(true)` if `value` exposes a custom unmarshaling capability and it succeeded;
/// - `Ok(false)` if `value` doesn't expose any custom unmarshaling capability;
/// - `Err(_)` if `value` exposes a custom unmarshaling capability and it failed.
///
/// If `value` is a pointer, the pointee is initialized first (if needed) and inspected
/// in its stead.
pub fn try_unmarshal(value: &mut dyn Bind, text: &str) -> Result<bool, UnmarshalError> {
    if let Shape::Pointer(pointer) = value.shape() {
        return unmarshal_in_place(pointer.ensure_init(), text);
    }
    unmarshal_in_place(value, text)
}

fn unmarshal_in_place(value: &mut dyn Bind, text: &str) -> Result<bool, UnmarshalError> {
    let outcome = if let Some(unmarshaler) = value.as_unmarshal_param() {
        unmarshaler.unmarshal_param(text)
    } else if let Some(unmarshaler) = value.as_unmarshal_text() {
        unmarshaler.unmarshal_text(text.as_bytes())
    } else {
        return Ok(false);
    };
    outcome.map(|()| true).map_err(|source| UnmarshalError {
        value: text.to_owned(),
        source,
    })
}
