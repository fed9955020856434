//! Per-couple validation reports and the engine driver

use crate::couple::{Couple, CoupledFrames, couple_frames};
use crate::detail::{DetailReport, decode_details};
use crate::llc::{LinkLayerCheck, validate_llc};
use crate::pairing::{PairingOutcome, ResolvedTags, resolve_tags, validate_pairing};
use dlmstrace_core::detail::DetailDecode;
use dlmstrace_core::{TraceError, TraceResult};
use dlmstrace_hdlc::HdlcFrame;
use serde::Serialize;
use std::fmt;

/// Error propagation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationMode {
    /// Abort on the first failing couple
    FailFast,
    /// Check every couple and report all outcomes
    Accumulate,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
    /// Treat a couple whose sides do not both resolve to known APDU types
    /// as a failure instead of passing it by omission
    pub require_decodable_types: bool,
    /// Treat per-side detail decode failures as failures instead of
    /// report-only findings
    pub strict_details: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Accumulate,
            require_decodable_types: false,
            strict_details: false,
        }
    }
}

/// Which validator failed a couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    LinkLayer,
    RequestResponse,
    Pairing,
    Detail,
}

impl FailureKind {
    /// Turn the failure into the corresponding error, tagged with the
    /// couple's position in the capture
    pub fn into_error(self, couple: usize) -> TraceError {
        match self {
            Self::LinkLayer => TraceError::LlcValidation { couple },
            Self::RequestResponse => TraceError::RequestResponseValidation { couple },
            Self::Pairing => TraceError::PairValidation { couple },
            Self::Detail => TraceError::DetailValidation { couple },
        }
    }
}

/// Validation outcome for one couple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoupleReport {
    /// Position of the couple in the capture, starting at 0
    pub index: usize,
    pub link_layer: LinkLayerCheck,
    pub tags: ResolvedTags,
    pub pairing: PairingOutcome,
    pub details: DetailReport,
    /// First failed check under the active configuration, if any
    pub failure: Option<FailureKind>,
}

impl fmt::Display for CoupleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "couple {}: ", self.index)?;
        match (self.tags.request, self.tags.response) {
            (Some(req), Some(rsp)) => write!(f, "{} / {}", req, rsp)?,
            (Some(req), None) => write!(f, "{} / ?", req)?,
            (None, Some(rsp)) => write!(f, "? / {}", rsp)?,
            (None, None) => write!(f, "? / ?")?,
        }
        match self.failure {
            Some(FailureKind::LinkLayer) => write!(f, " - LLC header mismatch"),
            Some(FailureKind::RequestResponse) => write!(f, " - undecodable APDU types"),
            Some(FailureKind::Pairing) => match self.pairing {
                PairingOutcome::Mismatch { expected, .. } => {
                    write!(f, " - pairing mismatch, expected {}", expected)
                }
                _ => write!(f, " - pairing mismatch"),
            },
            Some(FailureKind::Detail) => write!(f, " - detail decode failure"),
            None => write!(f, " - ok"),
        }
    }
}

/// Validation outcome for a whole capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub couples: Vec<CoupleReport>,
    /// The capture ended with an unpaired information frame
    pub incomplete_trailing: bool,
}

impl TraceReport {
    /// Whether every couple passed every applicable check
    pub fn passed(&self) -> bool {
        self.couples.iter().all(|c| c.failure.is_none())
    }

    /// Number of failed couples
    pub fn failure_count(&self) -> usize {
        self.couples.iter().filter(|c| c.failure.is_some()).count()
    }

    /// The first failure as an error, for callers that want one
    pub fn first_error(&self) -> Option<TraceError> {
        self.couples
            .iter()
            .find_map(|c| c.failure.map(|kind| kind.into_error(c.index)))
    }
}

/// The validation engine
///
/// Applies the link-layer, pairing and detail checks to every couple in
/// capture order, under a [`ValidatorConfig`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator reproducing abort-on-first-error behavior
    pub fn fail_fast() -> Self {
        Self::new(ValidatorConfig {
            mode: ValidationMode::FailFast,
            ..ValidatorConfig::default()
        })
    }

    /// Get the active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate coupled frames
    ///
    /// In `FailFast` mode the first failing couple aborts the run with its
    /// error; in `Accumulate` mode the full report is always returned.
    pub fn validate(&self, coupled: &CoupledFrames) -> TraceResult<TraceReport> {
        let mut reports = Vec::with_capacity(coupled.couples.len());

        for (index, couple) in coupled.couples.iter().enumerate() {
            let report = self.check_couple(index, couple);
            if self.config.mode == ValidationMode::FailFast {
                if let Some(kind) = report.failure {
                    return Err(kind.into_error(index));
                }
            }
            reports.push(report);
        }

        if coupled.trailing.is_some() {
            log::warn!("capture ended with an unpaired information frame");
        }

        Ok(TraceReport {
            couples: reports,
            incomplete_trailing: coupled.trailing.is_some(),
        })
    }

    /// Couple a frame sequence and validate it
    pub fn validate_frames<I>(&self, frames: I) -> TraceResult<TraceReport>
    where
        I: IntoIterator<Item = HdlcFrame>,
    {
        self.validate(&couple_frames(frames)?)
    }

    fn check_couple(&self, index: usize, couple: &Couple) -> CoupleReport {
        let link_layer = validate_llc(couple);
        let tags = resolve_tags(couple);
        let pairing = validate_pairing(&tags);
        let details = decode_details(couple, &tags);

        log_detail_findings(index, &details);

        let failure = self.first_failure(&link_layer, &tags, &pairing, &details);
        CoupleReport {
            index,
            link_layer,
            tags,
            pairing,
            details,
            failure,
        }
    }

    fn first_failure(
        &self,
        link_layer: &LinkLayerCheck,
        tags: &ResolvedTags,
        pairing: &PairingOutcome,
        details: &DetailReport,
    ) -> Option<FailureKind> {
        if !link_layer.is_valid() {
            return Some(FailureKind::LinkLayer);
        }
        if self.config.require_decodable_types
            && (tags.request.is_none() || tags.response.is_none())
        {
            return Some(FailureKind::RequestResponse);
        }
        if pairing.is_mismatch() {
            return Some(FailureKind::Pairing);
        }
        if self.config.strict_details && details.has_failure() {
            return Some(FailureKind::Detail);
        }
        None
    }
}

fn log_detail_findings(index: usize, details: &DetailReport) {
    for (side, outcome) in [("request", details.request), ("response", details.response)] {
        match outcome {
            DetailDecode::Decoded(detail) => {
                log::debug!("couple {}: {} detail is {}", index, side, detail);
            }
            DetailDecode::OutOfRange { tag, value } => {
                log::warn!(
                    "couple {}: {} detail value {} is not a valid {} sub-type",
                    index,
                    side,
                    value,
                    tag
                );
            }
            DetailDecode::Truncated { tag } => {
                log::warn!(
                    "couple {}: {} payload ends before the {} sub-type byte",
                    index,
                    side,
                    tag
                );
            }
            DetailDecode::NotApplicable => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn couple(request: &[u8], response: &[u8]) -> Couple {
        Couple::new(
            Bytes::copy_from_slice(request),
            Bytes::copy_from_slice(response),
        )
    }

    fn coupled(couples: Vec<Couple>) -> CoupledFrames {
        CoupledFrames {
            couples,
            trailing: None,
        }
    }

    fn get_exchange() -> Couple {
        couple(
            &[0xE6, 0xE6, 0x00, 0xC0, 0x01],
            &[0xE6, 0xE7, 0x00, 0xC4, 0x01],
        )
    }

    fn mismatched_exchange() -> Couple {
        // get-request answered by set-response
        couple(
            &[0xE6, 0xE6, 0x00, 0xC0, 0x01],
            &[0xE6, 0xE7, 0x00, 0xC5, 0x01],
        )
    }

    #[test]
    fn test_clean_couple_passes() {
        let report = Validator::default()
            .validate(&coupled(vec![get_exchange()]))
            .unwrap();
        assert!(report.passed());
        assert_eq!(report.failure_count(), 0);
        assert!(report.first_error().is_none());
        assert_eq!(report.couples[0].failure, None);
    }

    #[test]
    fn test_accumulate_reports_all_failures() {
        let report = Validator::default()
            .validate(&coupled(vec![
                mismatched_exchange(),
                get_exchange(),
                mismatched_exchange(),
            ]))
            .unwrap();
        assert!(!report.passed());
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.couples[0].failure, Some(FailureKind::Pairing));
        assert_eq!(report.couples[1].failure, None);
        assert_eq!(report.couples[2].failure, Some(FailureKind::Pairing));
        assert!(matches!(
            report.first_error(),
            Some(TraceError::PairValidation { couple: 0 })
        ));
    }

    #[test]
    fn test_fail_fast_aborts_at_first_failure() {
        let result = Validator::fail_fast().validate(&coupled(vec![
            get_exchange(),
            mismatched_exchange(),
            get_exchange(),
        ]));
        assert!(matches!(
            result,
            Err(TraceError::PairValidation { couple: 1 })
        ));
    }

    #[test]
    fn test_llc_failure_wins_over_pairing() {
        let bad = couple(
            &[0xE6, 0xE6, 0x00, 0xC0, 0x01],
            &[0xE6, 0xE6, 0x00, 0xC5, 0x01],
        );
        let report = Validator::default().validate(&coupled(vec![bad])).unwrap();
        assert_eq!(report.couples[0].failure, Some(FailureKind::LinkLayer));
    }

    #[test]
    fn test_unknown_types_pass_by_default_and_fail_in_strict_mode() {
        // 0xC6 is outside the tag space
        let unknown = couple(
            &[0xE6, 0xE6, 0x00, 0xC6, 0x01],
            &[0xE6, 0xE7, 0x00, 0xC4, 0x01],
        );

        let report = Validator::default()
            .validate(&coupled(vec![unknown.clone()]))
            .unwrap();
        assert!(report.passed());

        let strict = Validator::new(ValidatorConfig {
            require_decodable_types: true,
            ..ValidatorConfig::default()
        });
        let report = strict.validate(&coupled(vec![unknown])).unwrap();
        assert_eq!(
            report.couples[0].failure,
            Some(FailureKind::RequestResponse)
        );
        assert!(matches!(
            report.first_error(),
            Some(TraceError::RequestResponseValidation { couple: 0 })
        ));
    }

    #[test]
    fn test_detail_failure_reported_not_raised_by_default() {
        // Response detail 0x07 is outside the get-response enumeration
        let odd_detail = couple(
            &[0xE6, 0xE6, 0x00, 0xC0, 0x01],
            &[0xE6, 0xE7, 0x00, 0xC4, 0x07],
        );

        let report = Validator::default()
            .validate(&coupled(vec![odd_detail.clone()]))
            .unwrap();
        assert!(report.passed());
        assert!(report.couples[0].details.has_failure());

        let strict = Validator::new(ValidatorConfig {
            strict_details: true,
            ..ValidatorConfig::default()
        });
        let report = strict.validate(&coupled(vec![odd_detail])).unwrap();
        assert_eq!(report.couples[0].failure, Some(FailureKind::Detail));
    }

    #[test]
    fn test_trailing_frame_recorded() {
        let with_trailing = CoupledFrames {
            couples: vec![get_exchange()],
            trailing: Some(Bytes::from(vec![0xE6, 0xE6, 0x00])),
        };
        let report = Validator::default().validate(&with_trailing).unwrap();
        assert!(report.incomplete_trailing);
        // An incomplete trailing couple is a finding, not a failure
        assert!(report.passed());
    }

    #[test]
    fn test_report_display() {
        let report = Validator::default()
            .validate(&coupled(vec![get_exchange(), mismatched_exchange()]))
            .unwrap();
        assert_eq!(
            report.couples[0].to_string(),
            "couple 0: get-request / get-response - ok"
        );
        assert_eq!(
            report.couples[1].to_string(),
            "couple 1: get-request / set-response - pairing mismatch, expected get-response"
        );
    }
}
