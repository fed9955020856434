//! APDU tag space and request/response pairing rules
//!
//! DLMS/COSEM application layer messages start with a one-byte type tag.
//! The checker only needs the tag space itself and the rule table that says
//! which request tag must be answered by which response tag; APDU bodies are
//! never decoded here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// APDU type tag values
///
/// Each DLMS/COSEM APDU type has a unique tag byte identifier. The `glo_*`
/// tags carry ciphered payloads and are recognized at type level only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ApduTag {
    /// AARQ (association request)
    Aarq = 0x60,
    /// AARE (association response)
    Aare = 0x61,
    /// GET-Request
    GetRequest = 0xC0,
    /// SET-Request
    SetRequest = 0xC1,
    /// EVENT-NOTIFICATION-Request
    EventNotificationRequest = 0xC2,
    /// ACTION-Request
    ActionRequest = 0xC3,
    /// GET-Response
    GetResponse = 0xC4,
    /// SET-Response
    SetResponse = 0xC5,
    /// ACTION-Response
    ActionResponse = 0xC7,
    /// glo-GET-Request (ciphered)
    GloGetRequest = 0xC8,
    /// glo-SET-Request (ciphered)
    GloSetRequest = 0xC9,
    /// glo-EVENT-NOTIFICATION-Request (ciphered)
    GloEventNotificationRequest = 0xCA,
    /// glo-ACTION-Request (ciphered)
    GloActionRequest = 0xCB,
    /// glo-GET-Response (ciphered)
    GloGetResponse = 0xCC,
    /// glo-SET-Response (ciphered)
    GloSetResponse = 0xCD,
    /// glo-ACTION-Response (ciphered)
    GloActionResponse = 0xCF,
}

impl ApduTag {
    /// Create from tag byte value
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x60 => Some(Self::Aarq),
            0x61 => Some(Self::Aare),
            0xC0 => Some(Self::GetRequest),
            0xC1 => Some(Self::SetRequest),
            0xC2 => Some(Self::EventNotificationRequest),
            0xC3 => Some(Self::ActionRequest),
            0xC4 => Some(Self::GetResponse),
            0xC5 => Some(Self::SetResponse),
            0xC7 => Some(Self::ActionResponse),
            0xC8 => Some(Self::GloGetRequest),
            0xC9 => Some(Self::GloSetRequest),
            0xCA => Some(Self::GloEventNotificationRequest),
            0xCB => Some(Self::GloActionRequest),
            0xCC => Some(Self::GloGetResponse),
            0xCD => Some(Self::GloSetResponse),
            0xCF => Some(Self::GloActionResponse),
            _ => None,
        }
    }

    /// Get the tag byte value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Pairing rule table: the response tag mandated for a request tag
    ///
    /// Request tags absent from the table are not pairing-checked.
    #[must_use]
    pub const fn expected_response(self) -> Option<Self> {
        match self {
            Self::GetRequest => Some(Self::GetResponse),
            Self::SetRequest => Some(Self::SetResponse),
            Self::ActionRequest => Some(Self::ActionResponse),
            Self::Aarq => Some(Self::Aare),
            Self::GloSetRequest => Some(Self::GloSetResponse),
            Self::GloActionRequest => Some(Self::GloActionResponse),
            _ => None,
        }
    }

    /// Human readable tag name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aarq => "aarq",
            Self::Aare => "aare",
            Self::GetRequest => "get-request",
            Self::SetRequest => "set-request",
            Self::EventNotificationRequest => "event-notification-request",
            Self::ActionRequest => "action-request",
            Self::GetResponse => "get-response",
            Self::SetResponse => "set-response",
            Self::ActionResponse => "action-response",
            Self::GloGetRequest => "glo-get-request",
            Self::GloSetRequest => "glo-set-request",
            Self::GloEventNotificationRequest => "glo-event-notification-request",
            Self::GloActionRequest => "glo-action-request",
            Self::GloGetResponse => "glo-get-response",
            Self::GloSetResponse => "glo-set-response",
            Self::GloActionResponse => "glo-action-response",
        }
    }
}

impl fmt::Display for ApduTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apdu_tag_from_u8() {
        assert_eq!(ApduTag::from_u8(0xC0), Some(ApduTag::GetRequest));
        assert_eq!(ApduTag::from_u8(0xC4), Some(ApduTag::GetResponse));
        assert_eq!(ApduTag::from_u8(0x60), Some(ApduTag::Aarq));
        assert_eq!(ApduTag::from_u8(0xCF), Some(ApduTag::GloActionResponse));
        // 0xC6 is unused in the tag space
        assert_eq!(ApduTag::from_u8(0xC6), None);
        assert_eq!(ApduTag::from_u8(0x00), None);
    }

    #[test]
    fn test_apdu_tag_round_trip() {
        let tags = [
            ApduTag::Aarq,
            ApduTag::Aare,
            ApduTag::GetRequest,
            ApduTag::SetRequest,
            ApduTag::EventNotificationRequest,
            ApduTag::ActionRequest,
            ApduTag::GetResponse,
            ApduTag::SetResponse,
            ApduTag::ActionResponse,
            ApduTag::GloGetRequest,
            ApduTag::GloSetRequest,
            ApduTag::GloEventNotificationRequest,
            ApduTag::GloActionRequest,
            ApduTag::GloGetResponse,
            ApduTag::GloSetResponse,
            ApduTag::GloActionResponse,
        ];
        for tag in tags {
            assert_eq!(ApduTag::from_u8(tag.as_u8()), Some(tag));
        }
    }

    #[test]
    fn test_pairing_table_entries() {
        assert_eq!(
            ApduTag::GetRequest.expected_response(),
            Some(ApduTag::GetResponse)
        );
        assert_eq!(
            ApduTag::SetRequest.expected_response(),
            Some(ApduTag::SetResponse)
        );
        assert_eq!(
            ApduTag::ActionRequest.expected_response(),
            Some(ApduTag::ActionResponse)
        );
        assert_eq!(ApduTag::Aarq.expected_response(), Some(ApduTag::Aare));
        assert_eq!(
            ApduTag::GloSetRequest.expected_response(),
            Some(ApduTag::GloSetResponse)
        );
        assert_eq!(
            ApduTag::GloActionRequest.expected_response(),
            Some(ApduTag::GloActionResponse)
        );
    }

    #[test]
    fn test_pairing_table_unlisted_requests() {
        // These tags are deliberately not pairing-checked
        assert_eq!(ApduTag::EventNotificationRequest.expected_response(), None);
        assert_eq!(ApduTag::GloGetRequest.expected_response(), None);
        assert_eq!(ApduTag::GetResponse.expected_response(), None);
        assert_eq!(ApduTag::Aare.expected_response(), None);
    }

    #[test]
    fn test_apdu_tag_display() {
        assert_eq!(format!("{}", ApduTag::GetRequest), "get-request");
        assert_eq!(format!("{}", ApduTag::GloSetResponse), "glo-set-response");
    }
}
