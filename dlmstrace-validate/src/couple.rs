//! Frame coupling: grouping information frames into request/response pairs

use bytes::Bytes;
use dlmstrace_core::{TraceError, TraceResult};
use dlmstrace_hdlc::HdlcFrame;

/// One request/response pair of application-layer payloads
///
/// Both sides are the hex-decoded information fields of two consecutive
/// information frames, in capture order: first the request, then the
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Couple {
    request: Bytes,
    response: Bytes,
}

impl Couple {
    /// Create a new couple
    pub fn new(request: Bytes, response: Bytes) -> Self {
        Self { request, response }
    }

    /// Get the request side payload
    pub fn request(&self) -> &[u8] {
        &self.request
    }

    /// Get the response side payload
    pub fn response(&self) -> &[u8] {
        &self.response
    }
}

/// Result of coupling a frame sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoupledFrames {
    /// Complete request/response couples, in capture order
    pub couples: Vec<Couple>,
    /// Unpaired request side left over at the end of the capture
    pub trailing: Option<Bytes>,
}

/// Group consecutive information frames into request/response couples
///
/// Non-information frames are skipped entirely. Information payloads are
/// decoded from hexadecimal text to raw bytes here; malformed hex fails
/// loudly. A trailing unpaired payload is returned instead of being
/// silently discarded.
pub fn couple_frames<I>(frames: I) -> TraceResult<CoupledFrames>
where
    I: IntoIterator<Item = HdlcFrame>,
{
    let mut couples = Vec::new();
    let mut pending: Option<Bytes> = None;

    for frame in frames {
        if !frame.is_information() {
            continue;
        }
        let payload = hex::decode(frame.information()).map_err(|e| {
            TraceError::InvalidHex(format!(
                "information field '{}': {}",
                frame.information(),
                e
            ))
        })?;
        let payload = Bytes::from(payload);
        match pending.take() {
            None => pending = Some(payload),
            Some(request) => couples.push(Couple::new(request, payload)),
        }
    }

    Ok(CoupledFrames {
        couples,
        trailing: pending,
    })
}
