//! HTTP middleware making up the request pipeline.
//!
//! - **Request ID**: generation and propagation of `X-Request-Id`
//! - **Logging**: "Started" / "Finished" lines around every request
//! - **Access Control**: rejects one HTTP method outright (DELETE)
//! - **Legacy Redirect**: `/tasks/<x>` → `/todos/<x>` before routing
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → Logging → Access Control → Redirect → Router
//!                           ↓             ↓             ↓
//!                   Started/Finished  403 Forbidden  301 Location
//! ```

pub mod access;
pub mod logging;
pub mod redirect;
pub mod request_id;

pub use access::{DELETE_FORBIDDEN_MESSAGE, DenyMethodLayer};
pub use logging::log_requests;
pub use redirect::{legacy_redirect_target, redirect_legacy_paths};
pub use request_id::{REQUEST_ID_HEADER, RequestIdExt, assign_request_id};
