//! Detail sub-type decoding for both sides of a couple

use crate::couple::Couple;
use crate::pairing::ResolvedTags;
use dlmstrace_core::detail::{self, DetailDecode};
use dlmstrace_core::ApduTag;
use serde::Serialize;

/// Byte offset of the detail sub-type, one past the APDU type tag
pub const DETAIL_OFFSET: usize = 4;

/// Per-side detail decode outcomes for one couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetailReport {
    pub request: DetailDecode,
    pub response: DetailDecode,
}

impl DetailReport {
    /// Whether either side failed to decode
    pub fn has_failure(&self) -> bool {
        self.request.is_failure() || self.response.is_failure()
    }
}

/// Decode the detail sub-type byte of each side against its own type's
/// enumeration
///
/// Sides whose type did not resolve, or whose type has no registered
/// enumeration, are skipped. Each side is decoded in isolation; a failure
/// on one side never affects the other.
pub fn decode_details(couple: &Couple, tags: &ResolvedTags) -> DetailReport {
    DetailReport {
        request: decode_side(tags.request, couple.request()),
        response: decode_side(tags.response, couple.response()),
    }
}

fn decode_side(tag: Option<ApduTag>, payload: &[u8]) -> DetailDecode {
    let Some(tag) = tag else {
        return DetailDecode::NotApplicable;
    };
    if !detail::has_enumeration(tag) {
        return DetailDecode::NotApplicable;
    }
    match payload.get(DETAIL_OFFSET) {
        Some(&value) => detail::decode_detail(tag, value),
        None => DetailDecode::Truncated { tag },
    }
}
