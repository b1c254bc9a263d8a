//! Condscan Core - data model shared by the scanner, server and CLI.
//!
//! This crate defines the request/response records exchanged with callers:
//!
//! - [`Unit`]: a named block of source code submitted for scanning
//! - [`Finding`]: one detected usage of an obsolete table or type
//! - [`IssueType`] and [`Severity`]: classification of a finding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  condscan-cli   │     │ condscan-server │  (User interfaces)
//! └────────┬────────┘     └────────┬────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────────────────────────────┐
//! │          condscan-rule-engine           │  (Pattern matching)
//! └────────────────────┬────────────────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     condscan-core (this crate)          │  (Data model)
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use condscan_core::Unit;
//!
//! let unit: Unit = serde_json::from_str(
//!     r#"{"pgm_name": "ZPRICING", "inc_name": "ZPRICING_F01", "type": "FORM"}"#,
//! )?;
//! assert_eq!(unit.start_line, 0);
//! assert!(unit.findings.is_none());
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Finding, IssueType, Severity, Unit};
