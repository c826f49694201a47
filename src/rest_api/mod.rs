//! # REST API Module
//!
//! Error mapping, response envelopes and parameter parsing shared by every
//! HTTP route.

pub mod errors;
pub mod parser;
pub mod response;

pub use errors::{RestError, RestResult};
pub use parser::{key_from_body, parse_key, PageQuery, MAX_PAGE_SIZE};
pub use response::{DeleteResponse, MutationResponse, PageResponse};
