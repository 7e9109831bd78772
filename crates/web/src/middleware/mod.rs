//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. Request body limit (10 MiB for uploads)

pub mod auth;
pub mod context;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{AuthRejection, RequireAuth};
pub use context::PageContext;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
