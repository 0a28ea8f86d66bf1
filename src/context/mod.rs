pub mod dto;
mod helpers;
mod request_context;

pub use dto::RequestContext;
pub use helpers::{
    extract_context_from_headers, forwarded_headers, REQUEST_ID_HEADER, USER_HEADER,
};
pub use request_context::{RequestContextExt, ANONYMOUS_USER};
