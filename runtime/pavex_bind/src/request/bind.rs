use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::binder::{Namespace, SourceValues, bind_data};
use crate::reflect::{Bind, resolves_to_record};

use super::body::{APPLICATION_JSON, BodyFormat, BufferedBody, decode_json, decode_xml, parse_form};
use super::errors::{BindError, BindingError, UnsupportedMediaType};
use super::path::PathParams;
use super::query::QueryParams;
use super::RequestHead;

/// Populate `target` using every piece of data carried by the incoming request.
///
/// # Steps
///
/// 1. If the request has a body, it's decoded according to its `Content-Type`:
///    - `application/json` (also the default when `Content-Type` is missing or empty)
///      and `application/xml`/`text/xml` bodies are deserialized into a fresh value,
///      which then replaces the content of `target`;
///    - `application/x-www-form-urlencoded` and `multipart/form-data` bodies are bound
///      field by field, using `form` source names. The query parameters are part of the
///      form too: they come after the body values of a urlencoded form and before the
///      fields of a multipart one;
///    - any other content type is rejected with [`UnsupportedMediaType`], leaving
///      `target` untouched.
/// 2. If `target` is a record, or a pointer to one, the query parameters are bound using
///    `query` source names.
/// 3. Then the path parameters, using `param` source names.
///
/// Binding stops at the first failure. Whatever was bound before the failure stays bound.
///
/// # JSON and XML bodies
///
/// JSON and XML bodies are deserialized via `serde` into a brand new `T`, which then
/// replaces the content of `target`.
/// Fields that are populated from the query string or the path, rather than from the
/// body, must therefore tolerate being absent from the body: mark them (or the whole
/// struct) with `#[serde(default)]`. Otherwise a body without them is rejected as a
/// type mismatch before the query and path parameters are bound.
///
/// # Example
///
/// ```rust
/// use pavex_bind::request::{RequestHead, body::BufferedBody, path::PathParams};
///
/// #[derive(Default, serde::Deserialize, pavex_bind::Bind)]
/// #[serde(default)]
/// struct Search {
///     #[bind(param = "user_id")]
///     user: u64,
///     #[bind(query = "q")]
///     terms: String,
///     page: u32,
/// }
///
/// let request = http::Request::get("/users/42/search?q=rust&page=2")
///     .body(())
///     .unwrap();
/// let head: RequestHead = request.into_parts().0.into();
/// let path_params: PathParams = [("user_id", "42")].into_iter().collect();
///
/// let mut search = Search::default();
/// pavex_bind::bind(&head, &BufferedBody::default(), &path_params, &mut search).unwrap();
///
/// assert_eq!(search.user, 42);
/// assert_eq!(search.terms, "rust");
/// assert_eq!(search.page, 2);
/// ```
pub fn bind<T>(
    request_head: &RequestHead,
    body: &BufferedBody,
    path_params: &PathParams,
    target: &mut T,
) -> Result<(), BindError>
where
    T: Bind + DeserializeOwned,
{
    let content_length = request_head
        .content_length()
        .unwrap_or(body.bytes.len() as u64);
    let query = QueryParams::extract(request_head);
    if content_length > 0 {
        bind_body(request_head, body, query.values(), target)?;
    }

    if !resolves_to_record(target) {
        return Ok(());
    }
    bind_namespace(target, query.values(), Namespace::Query)?;
    bind_namespace(target, &path_params.to_source_values(), Namespace::Param)?;
    Ok(())
}

fn bind_body<T>(
    request_head: &RequestHead,
    body: &BufferedBody,
    query: &SourceValues,
    target: &mut T,
) -> Result<(), BindError>
where
    T: Bind + DeserializeOwned,
{
    let content_type = match request_head.headers.get(CONTENT_TYPE) {
        Some(value) => value.to_str().map_err(|_| UnsupportedMediaType {
            actual: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })?,
        None => "",
    };
    let content_type = if content_type.is_empty() {
        tracing::debug!("The request has a body but no `Content-Type`, assuming JSON");
        APPLICATION_JSON
    } else {
        content_type
    };

    let Some(format) = BodyFormat::detect(content_type) else {
        return Err(UnsupportedMediaType {
            actual: content_type.to_owned(),
        }
        .into());
    };
    tracing::trace!(content_type, ?format, "Decoding the request body");
    match format {
        BodyFormat::Json => *target = decode_json(&body.bytes)?,
        BodyFormat::Xml => *target = decode_xml(&body.bytes)?,
        BodyFormat::Form => {
            let values = parse_form(content_type, &body.bytes, query)?;
            bind_namespace(target, &values, Namespace::Form)?;
        }
    }
    Ok(())
}

fn bind_namespace(
    target: &mut dyn Bind,
    source: &SourceValues,
    namespace: Namespace,
) -> Result<(), BindingError> {
    bind_data(target, source, namespace).map_err(|source| BindingError { namespace, source })
}
