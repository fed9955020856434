//! Core types for DLMS/COSEM trace validation
//!
//! This crate provides the closed APDU tag space, the per-type detail
//! enumerations, the request/response pairing rules and the error type
//! used throughout the trace checker.

pub mod apdu;
pub mod detail;
pub mod error;

pub use apdu::ApduTag;
pub use detail::{
    ActionRequestDetail, ActionResponseDetail, ApduDetail, DetailDecode, GetRequestDetail,
    GetResponseDetail, SetRequestDetail, SetResponseDetail, decode_detail,
};
pub use error::{TraceError, TraceResult};
