use std::collections::HashSet;

use super::event::{QueryTiming, TimingType};

/// Entries a single query produces on the SSR + RSC render path:
///
/// ```text
/// │ 639.62ms    Requested  Localization
/// │ 993.33ms    Resolved   Localization (Took 353.66ms)
/// │ 993.96ms    Requested  Localization      <- second load attempt
/// │ 994.03ms    Rendered   Localization
/// ```
///
/// Near the end of the list every query looks finished, so an empty
/// outstanding set only counts while at least one more full cycle fits after
/// the current position.
pub const FULL_CYCLE_ENTRY_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterfallSeverity {
    /// First waterfall of the request
    First,
    Repeated,
}

/// Scratch state for one pass over a timeline. A query is outstanding from
/// its `Requested` entry until its next `Rendered` entry.
#[derive(Debug, Default)]
pub struct WaterfallDetector<'a> {
    outstanding: HashSet<&'a str>,
    detected: usize,
}

impl<'a> WaterfallDetector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, entry: &'a QueryTiming) {
        match entry.timing_type {
            TimingType::Requested => {
                self.outstanding.insert(entry.name.as_str());
            }
            TimingType::Rendered => {
                self.outstanding.remove(entry.name.as_str());
            }
            TimingType::Resolved => {}
        }
    }

    /// Called after the entry at `index` has been tracked.
    pub fn check(&mut self, index: usize, len: usize) -> Option<WaterfallSeverity> {
        if len < index + FULL_CYCLE_ENTRY_COUNT || !self.outstanding.is_empty() {
            return None;
        }
        self.detected += 1;
        if self.detected == 1 {
            Some(WaterfallSeverity::First)
        } else {
            Some(WaterfallSeverity::Repeated)
        }
    }

    pub fn detected(&self) -> usize {
        self.detected
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.outstanding.is_empty()
    }
}

/// Indices at which a waterfall boundary is detected.
pub fn detect_waterfalls(timings: &[QueryTiming]) -> Vec<usize> {
    let mut detector = WaterfallDetector::new();
    let mut boundaries = Vec::new();
    for (index, entry) in timings.iter().enumerate() {
        detector.track(entry);
        if detector.check(index, timings.len()).is_some() {
            boundaries.push(index);
        }
    }
    boundaries
}
