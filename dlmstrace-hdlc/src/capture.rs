//! Capture file reading and frame-line selection
//!
//! A capture is a text file with one hexadecimal HDLC frame per line,
//! flag-delimited (`7e...7e`). Lines that are not flag-delimited hex are
//! ignored; frames that fail to decode are skipped with a warning so a
//! partially damaged capture can still be checked.

use crate::frame::HdlcFrame;
use dlmstrace_core::TraceResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

static FRAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^7e([0-9a-f]*)7e$").expect("frame line pattern"));

/// Render a frame body as a flag-delimited capture line
pub fn capture_line(body: &[u8]) -> String {
    format!("7e{}7e", hex::encode(body))
}

/// Parse all frames out of a capture source
pub fn parse_capture<R: BufRead>(reader: R) -> TraceResult<Vec<HdlcFrame>> {
    let mut frames = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let Some(captures) = FRAME_LINE.captures(line.trim()) else {
            continue;
        };
        let body = match hex::decode(&captures[1]) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Skipping frame line with odd hex payload: {}", e);
                continue;
            }
        };
        match HdlcFrame::decode(&body) {
            Ok(frame) => {
                log::debug!("Decoded {}", frame);
                frames.push(frame);
            }
            Err(e) => log::warn!("Failed to decode HDLC frame: {}", e),
        }
    }

    Ok(frames)
}

/// Load a capture file and parse all frames out of it
pub fn load_capture<P: AsRef<Path>>(path: P) -> TraceResult<Vec<HdlcFrame>> {
    let file = File::open(path)?;
    parse_capture(BufReader::new(file))
}
