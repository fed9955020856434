//! Detail sub-type enumerations per APDU type
//!
//! Some APDU types are refined by a second tag byte selecting the structural
//! variant of the message (normal, with-list, datablock-segmented, ...).
//! This module holds one closed enumeration per such type and the lookup
//! that decodes a sub-type byte against the enumeration registered for a
//! given [`ApduTag`]. Types without sub-variants (aarq/aare, event
//! notification, all `glo_*` tags) have no enumeration and are skipped.

use crate::apdu::ApduTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// GET-Request detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum GetRequestDetail {
    Normal = 1,
    Next = 2,
    WithList = 3,
}

/// GET-Response detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum GetResponseDetail {
    Normal = 1,
    WithDatablock = 2,
    WithList = 3,
}

/// SET-Request detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SetRequestDetail {
    Normal = 1,
    WithFirstDatablock = 2,
    WithDatablock = 3,
    WithList = 4,
    WithListAndFirstDatablock = 5,
}

/// SET-Response detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SetResponseDetail {
    Normal = 1,
    Datablock = 2,
    LastDatablock = 3,
    LastDatablockWithList = 4,
    WithList = 5,
}

/// ACTION-Request detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionRequestDetail {
    Normal = 1,
    NextPblock = 2,
    WithList = 3,
    WithFirstPblock = 4,
    WithListAndFirstPblock = 5,
    WithPblock = 6,
}

/// ACTION-Response detail variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionResponseDetail {
    Normal = 1,
    WithPblock = 2,
    WithList = 3,
    NextPblock = 4,
}

impl GetRequestDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::Next),
            3 => Some(Self::WithList),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "get-request-normal",
            Self::Next => "get-request-next",
            Self::WithList => "get-request-with-list",
        }
    }
}

impl GetResponseDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::WithDatablock),
            3 => Some(Self::WithList),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "get-response-normal",
            Self::WithDatablock => "get-response-with-datablock",
            Self::WithList => "get-response-with-list",
        }
    }
}

impl SetRequestDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::WithFirstDatablock),
            3 => Some(Self::WithDatablock),
            4 => Some(Self::WithList),
            5 => Some(Self::WithListAndFirstDatablock),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "set-request-normal",
            Self::WithFirstDatablock => "set-request-with-first-datablock",
            Self::WithDatablock => "set-request-with-datablock",
            Self::WithList => "set-request-with-list",
            Self::WithListAndFirstDatablock => "set-request-with-list-and-first-datablock",
        }
    }
}

impl SetResponseDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::Datablock),
            3 => Some(Self::LastDatablock),
            4 => Some(Self::LastDatablockWithList),
            5 => Some(Self::WithList),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "set-response-normal",
            Self::Datablock => "set-response-datablock",
            Self::LastDatablock => "set-response-last-datablock",
            Self::LastDatablockWithList => "set-response-last-datablock-with-list",
            Self::WithList => "set-response-with-list",
        }
    }
}

impl ActionRequestDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::NextPblock),
            3 => Some(Self::WithList),
            4 => Some(Self::WithFirstPblock),
            5 => Some(Self::WithListAndFirstPblock),
            6 => Some(Self::WithPblock),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "action-request-normal",
            Self::NextPblock => "action-request-next-pblock",
            Self::WithList => "action-request-with-list",
            Self::WithFirstPblock => "action-request-with-first-pblock",
            Self::WithListAndFirstPblock => "action-request-with-list-and-first-pblock",
            Self::WithPblock => "action-request-with-pblock",
        }
    }
}

impl ActionResponseDetail {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::WithPblock),
            3 => Some(Self::WithList),
            4 => Some(Self::NextPblock),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "action-response-normal",
            Self::WithPblock => "action-response-with-pblock",
            Self::WithList => "action-response-with-list",
            Self::NextPblock => "action-response-next-pblock",
        }
    }
}

/// A detail sub-type decoded against its APDU type's own enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApduDetail {
    GetRequest(GetRequestDetail),
    GetResponse(GetResponseDetail),
    SetRequest(SetRequestDetail),
    SetResponse(SetResponseDetail),
    ActionRequest(ActionRequestDetail),
    ActionResponse(ActionResponseDetail),
}

impl ApduDetail {
    /// Human readable sub-type name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetRequest(d) => d.name(),
            Self::GetResponse(d) => d.name(),
            Self::SetRequest(d) => d.name(),
            Self::SetResponse(d) => d.name(),
            Self::ActionRequest(d) => d.name(),
            Self::ActionResponse(d) => d.name(),
        }
    }
}

impl fmt::Display for ApduDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `tag` has a registered detail enumeration
#[must_use]
pub const fn has_enumeration(tag: ApduTag) -> bool {
    matches!(
        tag,
        ApduTag::GetRequest
            | ApduTag::GetResponse
            | ApduTag::SetRequest
            | ApduTag::SetResponse
            | ApduTag::ActionRequest
            | ApduTag::ActionResponse
    )
}

/// Outcome of decoding one side's detail sub-type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetailDecode {
    /// The APDU type has no registered detail enumeration (or the type
    /// itself did not resolve); skipped by policy
    NotApplicable,
    /// Sub-type byte decoded against the type's enumeration
    Decoded(ApduDetail),
    /// Sub-type byte is not a member of the type's enumeration
    OutOfRange { tag: ApduTag, value: u8 },
    /// The payload ends before the sub-type byte
    Truncated { tag: ApduTag },
}

impl DetailDecode {
    /// Whether this outcome is a decode failure
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::Truncated { .. })
    }
}

/// Decode a detail sub-type byte against the enumeration registered for `tag`
///
/// Returns [`DetailDecode::NotApplicable`] for tags without an enumeration.
#[must_use]
pub fn decode_detail(tag: ApduTag, value: u8) -> DetailDecode {
    let detail = match tag {
        ApduTag::GetRequest => GetRequestDetail::from_u8(value).map(ApduDetail::GetRequest),
        ApduTag::GetResponse => GetResponseDetail::from_u8(value).map(ApduDetail::GetResponse),
        ApduTag::SetRequest => SetRequestDetail::from_u8(value).map(ApduDetail::SetRequest),
        ApduTag::SetResponse => SetResponseDetail::from_u8(value).map(ApduDetail::SetResponse),
        ApduTag::ActionRequest => ActionRequestDetail::from_u8(value).map(ApduDetail::ActionRequest),
        ApduTag::ActionResponse => {
            ActionResponseDetail::from_u8(value).map(ApduDetail::ActionResponse)
        }
        _ => return DetailDecode::NotApplicable,
    };

    match detail {
        Some(detail) => DetailDecode::Decoded(detail),
        None => DetailDecode::OutOfRange { tag, value },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_enumerations() {
        assert!(has_enumeration(ApduTag::GetRequest));
        assert!(has_enumeration(ApduTag::ActionResponse));
        assert!(!has_enumeration(ApduTag::Aarq));
        assert!(!has_enumeration(ApduTag::EventNotificationRequest));
        assert!(!has_enumeration(ApduTag::GloGetRequest));
    }

    #[test]
    fn test_decode_detail_all_registered_codes() {
        let table: [(ApduTag, &[u8]); 6] = [
            (ApduTag::GetRequest, &[1, 2, 3]),
            (ApduTag::GetResponse, &[1, 2, 3]),
            (ApduTag::SetRequest, &[1, 2, 3, 4, 5]),
            (ApduTag::SetResponse, &[1, 2, 3, 4, 5]),
            (ApduTag::ActionRequest, &[1, 2, 3, 4, 5, 6]),
            (ApduTag::ActionResponse, &[1, 2, 3, 4]),
        ];
        for (tag, codes) in table {
            for &code in codes {
                match decode_detail(tag, code) {
                    DetailDecode::Decoded(_) => {}
                    other => panic!("{} code {} should decode, got {:?}", tag, code, other),
                }
            }
            // One past the enumeration must fail to decode
            let next = codes[codes.len() - 1] + 1;
            assert_eq!(
                decode_detail(tag, next),
                DetailDecode::OutOfRange { tag, value: next }
            );
            assert_eq!(
                decode_detail(tag, 0),
                DetailDecode::OutOfRange { tag, value: 0 }
            );
        }
    }

    #[test]
    fn test_decode_detail_unregistered_tag() {
        assert_eq!(decode_detail(ApduTag::Aare, 1), DetailDecode::NotApplicable);
        assert_eq!(
            decode_detail(ApduTag::GloSetRequest, 1),
            DetailDecode::NotApplicable
        );
    }

    #[test]
    fn test_detail_failure_predicate() {
        assert!(!DetailDecode::NotApplicable.is_failure());
        assert!(
            !DetailDecode::Decoded(ApduDetail::GetRequest(GetRequestDetail::Normal)).is_failure()
        );
        assert!(
            DetailDecode::OutOfRange {
                tag: ApduTag::GetRequest,
                value: 9
            }
            .is_failure()
        );
        assert!(
            DetailDecode::Truncated {
                tag: ApduTag::GetResponse
            }
            .is_failure()
        );
    }

    #[test]
    fn test_detail_display() {
        assert_eq!(
            format!("{}", ApduDetail::GetResponse(GetResponseDetail::WithDatablock)),
            "get-response-with-datablock"
        );
        assert_eq!(
            format!("{}", ApduDetail::ActionRequest(ActionRequestDetail::WithPblock)),
            "action-request-with-pblock"
        );
    }
}
