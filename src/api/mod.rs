//! HTTP surface of the LRS.
//!
//! Query validation, filter building, response assembly and the multipart
//! encoding live here, composed by the handlers in [`handlers`].

mod error;
pub mod handlers;
pub mod multipart;
pub mod query;
pub mod response;

pub use error::ApiError;
pub use multipart::ATTACHMENT_HASH_HEADER;
pub use response::CONSISTENT_THROUGH_HEADER;

/// Response header naming the xAPI version served.
pub const VERSION_HEADER: &str = "X-Experience-API-Version";

/// The xAPI version this LRS implements.
pub const XAPI_VERSION: &str = "1.0.3";
