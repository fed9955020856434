//! Command line driver: validate one capture file

use anyhow::{Context, Result, bail};
use dlmstrace_hdlc::load_capture;
use dlmstrace_validate::{Validator, couple_frames};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: dlmstrace <capture-file>")?;

    let frames =
        load_capture(&path).with_context(|| format!("failed to read capture '{}'", path))?;
    log::info!("{}: {} frames", path, frames.len());

    let coupled = couple_frames(frames)?;
    let report = Validator::default().validate(&coupled)?;

    for couple in &report.couples {
        println!("{}", couple);
    }
    if report.incomplete_trailing {
        eprintln!("warning: capture ended with an unpaired information frame");
    }
    if !report.passed() {
        bail!(
            "{} of {} couples failed validation",
            report.failure_count(),
            report.couples.len()
        );
    }

    println!("{} couples validated", report.couples.len());
    Ok(())
}
