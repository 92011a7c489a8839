use super::event::{QueryTiming, TimingType};
use super::waterfall::{WaterfallDetector, WaterfallSeverity};
use super::QueryTimeline;
use crate::log::Logger;
use crate::query::QueryNames;
use crate::request::{parse_url, RenderType, ServerRequest};

const ELAPSED_WIDTH: usize = 11;
const LABEL_WIDTH: usize = 10;
const WATERFALL_WARNING: &str = "Suspense waterfall detected";

/// What a `print` call wrote out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineReport {
    pub entries: usize,
    pub waterfalls: usize,
}

impl<N: QueryNames> QueryTimeline<N> {
    /// Writes the request's timeline to `log`, flagging suspense waterfalls.
    /// Does nothing at all unless `show_query_timing` is on.
    pub fn print<L: Logger + ?Sized>(
        &self,
        render_type: RenderType,
        request: &ServerRequest,
        log: &mut L,
    ) -> Option<TimelineReport> {
        if !log.options().show_query_timing {
            return None;
        }

        let neutral = self.style.neutral;
        log.debug(&neutral.paint(&format!(
            "┌── Query timings for {}",
            parse_url(render_type, &request.url)
        )));

        let timings = &request.ctx.query_timings;
        let mut report = TimelineReport::default();
        if !timings.is_empty() {
            let mut detector = WaterfallDetector::new();

            for (index, query) in timings.iter().enumerate() {
                detector.track(query);
                log.debug(&neutral.paint(&self.format_entry(query, request.time)));
                report.entries += 1;

                if let Some(severity) = detector.check(index, timings.len()) {
                    let highlight = match severity {
                        WaterfallSeverity::First => self.style.warning,
                        WaterfallSeverity::Repeated => self.style.strong_warning,
                    };
                    log.debug(&format!(
                        "{}{}",
                        neutral.paint("│ "),
                        highlight.paint(WATERFALL_WARNING)
                    ));
                }
            }
            report.waterfalls = detector.detected();
        }

        log.debug(&neutral.paint("└──"));
        Some(report)
    }

    fn format_entry(&self, query: &QueryTiming, request_start: f64) -> String {
        let elapsed = format!("{}ms", to_fixed2(query.timestamp - request_start));
        let took = match (query.timing_type, query.duration) {
            (TimingType::Resolved, Some(duration)) => format!(" (Took {}ms)", to_fixed2(duration)),
            (TimingType::Resolved, None) => " (Took unknown)".to_string(),
            _ => String::new(),
        };
        format!(
            "│ {:<ew$} {:<lw$} {}{}",
            elapsed,
            self.style.labels.label(query.timing_type),
            query.name,
            took,
            ew = ELAPSED_WIDTH,
            lw = LABEL_WIDTH,
        )
    }
}

/// Two decimals, exact ties rounded away from zero.
///
/// `{:.2}` rounds an exact tie to even (`0.125` -> `0.12`). An f64 can only sit
/// exactly halfway between two hundredths when eight times it is an odd
/// integer, so only those values need the other rule.
fn to_fixed2(value: f64) -> String {
    let eighths = value * 8.0;
    let is_tie = eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0;
    if !is_tie {
        return format!("{:.2}", value);
    }
    let hundredths = (value.abs() * 100.0 + 0.5).floor() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
}
