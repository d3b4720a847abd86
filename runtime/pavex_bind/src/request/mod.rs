//! Bind incoming HTTP requests onto your types.
//!
//! The entrypoint is [`bind`]: it takes the [`RequestHead`], the buffered body and
//! the path parameters captured by your router.
pub use bind::bind;
pub use request_head::RequestHead;

mod bind;
pub mod body;
pub mod errors;
pub mod path;
pub mod query;
mod request_head;
