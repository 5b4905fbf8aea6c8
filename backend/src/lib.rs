//! FaceExpo backend library.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, ports and
//! services; [`outbound`] implements the driven ports; [`inbound`] exposes
//! the driving ports over HTTP; [`client`] is the in-process state layer the
//! views drive; [`wiring`] assembles the pieces.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wiring;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
