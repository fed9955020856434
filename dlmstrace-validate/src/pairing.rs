//! APDU type extraction and request/response pairing validation

use crate::couple::Couple;
use dlmstrace_core::ApduTag;
use serde::Serialize;

/// Byte offset of the APDU type tag, one past the LLC header
pub const APDU_TAG_OFFSET: usize = 3;

/// APDU tags resolved for both sides of a couple
///
/// A side whose tag byte is absent or not in the tag space resolves to
/// `None` and is excluded from pairing comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedTags {
    pub request: Option<ApduTag>,
    pub response: Option<ApduTag>,
}

/// Why a couple was not pairing-checked
///
/// Pass-by-omission is deliberate policy: unrecognized traffic and request
/// types outside the rule table are accepted without comparison, so that a
/// stricter mode can later turn these into failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OmissionReason {
    /// Request tag byte did not resolve to a known APDU type
    UnknownRequestType,
    /// Response tag byte did not resolve to a known APDU type
    UnknownResponseType,
    /// Request type has no entry in the pairing rule table
    UnlistedRequestType,
}

/// Outcome of the pairing check for one couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairingOutcome {
    /// Response type equals the mandated type for the request
    Matched { request: ApduTag, response: ApduTag },
    /// Response type differs from the mandated type
    Mismatch {
        request: ApduTag,
        expected: ApduTag,
        response: ApduTag,
    },
    /// Pairing not checked; accepted by omission
    NotChecked(OmissionReason),
}

impl PairingOutcome {
    /// Whether this outcome is a pairing failure
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

/// Extract and resolve the APDU type tag from each side of a couple
pub fn resolve_tags(couple: &Couple) -> ResolvedTags {
    ResolvedTags {
        request: tag_at(couple.request()),
        response: tag_at(couple.response()),
    }
}

fn tag_at(payload: &[u8]) -> Option<ApduTag> {
    payload
        .get(APDU_TAG_OFFSET)
        .copied()
        .and_then(ApduTag::from_u8)
}

/// Compare the resolved response type against the mandated one
///
/// The rule table lookup happens on the request side first, mirroring the
/// order of the checks: an unknown request type, an unlisted request type,
/// and an unknown response type each skip the comparison with their own
/// named reason.
pub fn validate_pairing(tags: &ResolvedTags) -> PairingOutcome {
    let Some(request) = tags.request else {
        return PairingOutcome::NotChecked(OmissionReason::UnknownRequestType);
    };
    let Some(expected) = request.expected_response() else {
        return PairingOutcome::NotChecked(OmissionReason::UnlistedRequestType);
    };
    let Some(response) = tags.response else {
        return PairingOutcome::NotChecked(OmissionReason::UnknownResponseType);
    };

    if response == expected {
        PairingOutcome::Matched { request, response }
    } else {
        PairingOutcome::Mismatch {
            request,
            expected,
            response,
        }
    }
}
