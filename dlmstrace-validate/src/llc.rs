//! Link-layer (LLC) header validation

use crate::couple::Couple;
use dlmstrace_hdlc::{LLC_REQUEST, LLC_RESPONSE};
use serde::Serialize;

/// Length of the LLC header prefixing each side of a couple
pub const LLC_LENGTH: usize = 3;

/// Outcome of the link-layer check for one couple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkLayerCheck {
    /// Both prefixes match their expected orientation
    Valid,
    /// Observed prefixes, possibly shorter than the LLC header
    Mismatch {
        request: Vec<u8>,
        response: Vec<u8>,
    },
}

impl LinkLayerCheck {
    /// Whether the check passed
    pub fn is_valid(&self) -> bool {
        *self == Self::Valid
    }
}

/// Check both sides of a couple against their own LLC constant
///
/// The request side must open with the client-to-server header and the
/// response side with the server-to-client header. A side shorter than the
/// header fails the check.
pub fn validate_llc(couple: &Couple) -> LinkLayerCheck {
    let request_ok = couple.request().get(..LLC_LENGTH) == Some(&LLC_REQUEST[..]);
    let response_ok = couple.response().get(..LLC_LENGTH) == Some(&LLC_RESPONSE[..]);

    if request_ok && response_ok {
        LinkLayerCheck::Valid
    } else {
        LinkLayerCheck::Mismatch {
            request: prefix(couple.request()),
            response: prefix(couple.response()),
        }
    }
}

fn prefix(payload: &[u8]) -> Vec<u8> {
    payload[..payload.len().min(LLC_LENGTH)].to_vec()
}
