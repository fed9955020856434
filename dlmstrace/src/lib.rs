//! dlmstrace - DLMS/COSEM HDLC trace conformance checker
//!
//! Validates a captured exchange of DLMS/COSEM application-layer messages
//! carried over an HDLC data-link: request/response couples are checked for
//! LLC header orientation, APDU type pairing against the rule table, and
//! detail sub-type consistency.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `dlmstrace-core`: APDU tag space, detail enumerations, pairing rules, errors
//! - `dlmstrace-hdlc`: capture reading and HDLC frame parsing
//! - `dlmstrace-validate`: coupling and the validation engine
//!
//! # Usage
//!
//! ```no_run
//! use dlmstrace::hdlc::load_capture;
//! use dlmstrace::validate::Validator;
//!
//! # fn main() -> dlmstrace::TraceResult<()> {
//! let frames = load_capture("capture.tpl")?;
//! let report = Validator::default().validate_frames(frames)?;
//! assert!(report.passed());
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use dlmstrace_core::{ApduDetail, ApduTag, TraceError, TraceResult};

// Re-export the HDLC layer
pub mod hdlc {
    pub use dlmstrace_hdlc::*;
}

// Re-export the validation engine
pub mod validate {
    pub use dlmstrace_validate::*;
}
