//! Per-request query timeline.
//!
//! # SCOPE INVARIANT
//! A timeline belongs to exactly one request (`RequestContext`). Nothing here
//! keeps state across requests; the detector's scratch state lives only for a
//! single `print` call.
//!
//! # ORDER INVARIANT
//! Entries are append-only and printed in insertion order. Timestamps are
//! non-decreasing because each entry observes "now" when it is recorded.

pub mod event;
pub mod printer;
pub mod recorder;
pub mod waterfall;

use crate::query::{QueryNameRegistry, QueryNames};
use crate::style::TimelineStyle;

/// Collector and printer, sharing the name registry and the output style.
#[derive(Debug, Default)]
pub struct QueryTimeline<N = QueryNameRegistry> {
    names: N,
    style: TimelineStyle,
}

impl<N: QueryNames> QueryTimeline<N> {
    pub fn new(names: N, style: TimelineStyle) -> Self {
        Self { names, style }
    }
}
