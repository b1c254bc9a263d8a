//! Condscan Server - request/response interface for the scanner
//!
//! Exposes the rule engine over HTTP:
//!
//! - `POST /remediate-array`: scan a batch, return only units with findings
//! - `POST /remediate`: scan one unit, always return it
//! - `GET /health`: liveness probe, no scanning
//!
//! ```no_run
//! # use condscan_server::ScanServerBuilder;
//! # async fn example() -> Result<(), condscan_server::ServerError> {
//! let server = ScanServerBuilder::new().host("0.0.0.0").port(8000).build()?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod server;

pub use error::{ApiError, ServerError};
pub use health::HealthResponse;
pub use router::{create_router, AppState};
pub use server::{ScanServer, ScanServerBuilder};
