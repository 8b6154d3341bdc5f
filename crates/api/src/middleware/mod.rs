//! HTTP middleware.
//!
//! - [`request_id`] - Correlation ID on every request and response
//! - [`security_headers`] - Restrictive response headers
//! - [`cors`] - Browser origin policy from `CORS_ORIGINS`

pub mod cors;
pub mod request_id;
pub mod security_headers;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
