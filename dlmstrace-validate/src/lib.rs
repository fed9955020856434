//! Request/response pairing and validation engine
//!
//! Groups decoded HDLC information frames into request/response couples and
//! checks each couple: LLC header orientation, APDU type pairing against the
//! rule table, and detail sub-type decoding. Results are collected into a
//! per-couple report; a fail-fast mode reproduces abort-on-first-error
//! behavior for callers that want it.

pub mod couple;
pub mod detail;
pub mod llc;
pub mod pairing;
pub mod report;

pub use couple::{Couple, CoupledFrames, couple_frames};
pub use detail::{DETAIL_OFFSET, DetailReport, decode_details};
pub use llc::{LinkLayerCheck, validate_llc};
pub use pairing::{
    APDU_TAG_OFFSET, OmissionReason, PairingOutcome, ResolvedTags, resolve_tags, validate_pairing,
};
pub use report::{
    CoupleReport, FailureKind, TraceReport, ValidationMode, Validator, ValidatorConfig,
};
