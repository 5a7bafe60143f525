//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Rate limiting (governor, per client IP, added in `main`)
//! 3. CORS
//! 4. `TraceLayer` (request span with empty `request_id` and `session_id` fields)
//! 5. Request context (fills the span fields, tags Sentry, echoes the request ID)

pub mod rate_limit;
pub mod request_context;

pub use rate_limit::{ClientIpKeyExtractor, RateLimiterLayer, rate_limiter};
pub use request_context::{REQUEST_ID_HEADER, request_context_middleware};
