//! HDLC capture reading and frame parsing
//!
//! This crate turns a text capture of flag-delimited hexadecimal lines into
//! decoded HDLC frames: capture line selection, frame-format and address
//! handling, control-byte classification, HCS/FCS verification and
//! information-field extraction. The validation engine consumes only the
//! frame type and the information field.

pub mod capture;
pub mod fcs;
pub mod frame;

pub use capture::{capture_line, load_capture, parse_capture};
pub use fcs::FcsCalc;
pub use frame::{FLAG, FrameType, HdlcFrame, LLC_REQUEST, LLC_RESPONSE};
