//! Request dispatch
//!
//! Resolves the numeric action code of an inbound request and routes it to
//! the matching storage, archive or upload operation.

pub mod actions;
pub mod handlers;
pub mod request;
pub mod responses;

pub use actions::Action;
pub use handlers::dispatch;
pub use request::FileRequest;
pub use responses::GsResponse;
