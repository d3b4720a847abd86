//! # pavex_bind - API reference
//!
//! Bind the data carried by an incoming HTTP request (a JSON or XML body, form fields,
//! query parameters, path parameters) onto your own types.
//!
//! The binder makes every decision at runtime, by inspecting the shape of the target
//! via the [`Bind`](trait@Bind) trait.
//! `#[derive(Bind)]` implements it for your structs, while the `#[bind(...)]` attribute
//! lets you pick a different input name for each source:
//!
//! ```rust
//! use pavex_bind::Bind;
//!
//! #[derive(Default, serde::Deserialize, Bind)]
//! // Fields filled from the query or the path may be missing from a JSON body.
//! #[serde(default)]
//! pub struct NewComment {
//!     // `?post=..` in the query string, `{post_id}` in the path.
//!     #[bind(query = "post", param = "post_id")]
//!     pub post: u64,
//!     // Looked up as `body`, or any case variation of it (e.g. `Body`).
//!     pub body: String,
//!     // Every `tag=..` field in a form body.
//!     pub tag: Vec<String>,
//!     #[bind(skip)]
//!     #[serde(skip)]
//!     pub author_id: u64,
//! }
//! ```
//!
//! The entrypoint is [`bind`].
//! The building blocks it's made of ([`bind_data`], [`coerce`](coerce::coerce) and
//! [`try_unmarshal`]) are exposed as well, in case you have input that doesn't come from
//! an HTTP request.

// Lets the derive macro refer to `::pavex_bind` from within this crate.
extern crate self as pavex_bind;

pub use binder::{Namespace, SourceValues, bind_data};
pub use pavex_bind_macros::Bind;
pub use reflect::Bind;
pub use request::bind;
pub use request::errors::BindError;
pub use unmarshal::{BoxError, UnmarshalError, UnmarshalParam, UnmarshalText, try_unmarshal};

pub mod binder;
pub mod coerce;
pub mod reflect;
pub mod request;
pub mod unmarshal;
