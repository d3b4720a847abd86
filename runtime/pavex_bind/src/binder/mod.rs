//! Populate a record, field by field, from a multimap of string values.
//!
//! # Overview
//!
//! [`bind_data`] walks the fields of the target in declaration order.
//! For each field, it works out which input name to look for:
//!
//! 1. the explicit tag for the current [`Namespace`], if there is one
//!    (e.g. `#[bind(query = "city")]`);
//! 2. otherwise, if the field is itself a record (without a custom unmarshaling
//!    capability), the binder recurses into it using the same input;
//! 3. otherwise, the name of the field.
//!
//! The name is matched exactly first, case-insensitively second.
//! Fields without a matching input are left alone: missing input is never an error.
pub use errors::{BindDataError, FieldBindingError};
pub use namespace::Namespace;
pub use source_values::SourceValues;

use crate::coerce::coerce;
use crate::reflect::{Bind, Field, Record, Shape};
use crate::unmarshal::try_unmarshal;

pub mod errors;
mod namespace;
mod source_values;

/// Populate `target` using the values in `source`.
///
/// `target` can be a record or a string-to-string map.
/// Pointers to either are followed, initializing them if needed.
///
/// The first failure aborts binding: fields processed before the failure keep
/// their new values.
pub fn bind_data(
    target: &mut dyn Bind,
    source: &SourceValues,
    namespace: Namespace,
) -> Result<(), BindDataError> {
    if source.is_empty() {
        return Ok(());
    }
    match target.shape() {
        Shape::Pointer(pointer) => bind_data(pointer.ensure_init(), source, namespace),
        Shape::Mapping(mapping) => {
            for (name, values) in source.iter() {
                mapping.set_entry(name, &values[0]);
            }
            Ok(())
        }
        Shape::Record(record) => bind_record(record, source, namespace),
        shape => Err(BindDataError::NotARecord { kind: shape.kind() }),
    }
}

fn bind_record(
    record: &mut dyn Record,
    source: &SourceValues,
    namespace: Namespace,
) -> Result<(), BindDataError> {
    for field in record.fields() {
        let Field { name, tags, value } = field;
        let source_name = match tags.get(namespace) {
            Some(tag) => tag,
            None if is_nested_record(value) => {
                tracing::trace!(field = name, %namespace, "Binding nested record");
                bind_data(value, source, namespace)?;
                continue;
            }
            None => name,
        };

        let Some(values) = source.lookup(source_name) else {
            tracing::trace!(
                field = name,
                source_name,
                %namespace,
                "No input for field, skipping it"
            );
            continue;
        };

        let handled = try_unmarshal(value, &values[0])
            .map_err(|e| FieldBindingError::new(name, source_name, e))?;
        if handled {
            continue;
        }

        if let Shape::Sequence(sequence) = value.shape() {
            sequence
                .rebuild(values)
                .map_err(|e| FieldBindingError::new(name, source_name, e))?;
            continue;
        }
        coerce(value, &values[0]).map_err(|e| FieldBindingError::new(name, source_name, e))?;
    }
    Ok(())
}

/// `true` if the binder should recurse into `value` rather than look it up by name.
fn is_nested_record(value: &mut dyn Bind) -> bool {
    value.as_unmarshal_param().is_none()
        && value.as_unmarshal_text().is_none()
        && matches!(value.shape(), Shape::Record(_))
}
