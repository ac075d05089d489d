//! Recipe backend library modules.
//!
//! The binary in `main.rs` wires these together; tests and tooling use them
//! directly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
