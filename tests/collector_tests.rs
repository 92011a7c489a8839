use std::io;
use std::sync::{Arc, Mutex};

use query_timeline::clock::ManualClock;
use query_timeline::log::{LoggerOptions, RecordingLogger};
use query_timeline::query::{QueryKey, QueryNameRegistry};
use query_timeline::request::{RenderType, ServerRequest};
use query_timeline::style::TimelineStyle;
use query_timeline::timeline::waterfall::detect_waterfalls;
use query_timeline::{QueryTimeline, TimingType};
use serde_json::json;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn localization_key() -> QueryKey {
    QueryKey::new(vec![
        json!("localization"),
        json!({"body": "query Localization { localization { country { isoCode } } }"}),
    ])
}

#[test]
fn test_collect_appends_in_order() {
    let clock = Arc::new(ManualClock::new(5.0));
    let mut request = ServerRequest::with_clock("http://localhost/", clock.clone());
    let timeline = QueryTimeline::new(QueryNameRegistry::new(), TimelineStyle::plain());
    let key = localization_key();

    let phases = [
        (TimingType::Requested, None),
        (TimingType::Resolved, Some(3.0)),
        (TimingType::Requested, None),
        (TimingType::Rendered, None),
    ];
    for (timing_type, duration) in phases {
        clock.advance(1.5);
        timeline.collect(&mut request, &key, timing_type, duration);
    }

    let timings = &request.ctx.query_timings;
    assert_eq!(timings.len(), 4);
    assert!(timings.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(timings[0].timestamp, 6.5);
    assert_eq!(timings[3].timestamp, 11.0);
    assert_eq!(timings[1].duration, Some(3.0));
    assert!(timings.iter().all(|t| t.name == "query Localization"));
    let kinds: Vec<TimingType> = timings.iter().map(|t| t.timing_type).collect();
    assert_eq!(kinds, phases.iter().map(|p| p.0).collect::<Vec<_>>());
}

#[test]
fn test_registered_name_is_used() {
    let registry = QueryNameRegistry::new();
    let key = QueryKey::from("/api/reviews?product=42");
    registry.register(&key, "Reviews");
    let timeline = QueryTimeline::new(registry, TimelineStyle::plain());
    let mut request = ServerRequest::with_clock("http://localhost/", Arc::new(ManualClock::new(0.0)));

    timeline.collect(&mut request, &key, TimingType::Requested, None);
    timeline.collect(&mut request, &QueryKey::from("/api/other"), TimingType::Requested, None);

    assert_eq!(request.ctx.query_timings[0].name, "Reviews");
    assert_eq!(request.ctx.query_timings[1].name, "/api/other");
}

#[test]
fn test_requests_are_isolated() {
    let clock = Arc::new(ManualClock::new(0.0));
    let timeline = QueryTimeline::new(QueryNameRegistry::new(), TimelineStyle::plain());
    let mut first = ServerRequest::with_clock("http://localhost/a", clock.clone());
    let mut second = ServerRequest::with_clock("http://localhost/b", clock);

    timeline.collect(&mut first, &localization_key(), TimingType::Requested, None);
    timeline.collect(&mut first, &localization_key(), TimingType::Rendered, None);
    timeline.collect(&mut second, &localization_key(), TimingType::Requested, None);

    assert_eq!(first.ctx.query_timings.len(), 2);
    assert_eq!(second.ctx.query_timings.len(), 1);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_sequential_fetches_are_reported() {
    let timeline = Arc::new(QueryTimeline::new(QueryNameRegistry::new(), TimelineStyle::plain()));
    let options = LoggerOptions {
        show_query_timing: true,
        color: false,
    };

    let task_timeline = timeline.clone();
    let request = tokio::spawn(async move {
        let mut request = ServerRequest::new("http://localhost:3000/collections/all");
        for name in ["shop", "collection", "menu"] {
            let key = QueryKey::from(name);
            task_timeline.collect(&mut request, &key, TimingType::Requested, None);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            task_timeline.collect(&mut request, &key, TimingType::Resolved, Some(2.0));
            task_timeline.collect(&mut request, &key, TimingType::Requested, None);
            task_timeline.collect(&mut request, &key, TimingType::Rendered, None);
        }
        request
    })
    .await
    .unwrap();

    assert_eq!(detect_waterfalls(&request.ctx.query_timings), vec![3, 7]);

    let mut log = RecordingLogger::new(options);
    let report = timeline.print(RenderType::Ssr, &request, &mut log).unwrap();
    assert_eq!(report.entries, 12);
    assert_eq!(report.waterfalls, 2);
    // header + 12 entries + 2 warnings + footer
    assert_eq!(log.debug_calls(), 16);
    assert_eq!(log.lines[0], "┌── Query timings for /collections/all");
}

#[test]
fn test_resolved_without_duration_is_kept_and_warned() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let timeline = QueryTimeline::new(QueryNameRegistry::new(), TimelineStyle::plain());
    let mut request = ServerRequest::with_clock("http://localhost/", Arc::new(ManualClock::new(0.0)));

    tracing::subscriber::with_default(subscriber, || {
        timeline.collect(&mut request, &localization_key(), TimingType::Requested, None);
        timeline.collect(&mut request, &localization_key(), TimingType::Resolved, None);
    });

    let timings = &request.ctx.query_timings;
    assert_eq!(timings.len(), 2);
    assert_eq!(timings[1].timing_type, TimingType::Resolved);
    assert_eq!(timings[1].duration, None);

    let text = logs.text();
    let warnings: Vec<&str> = text.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "{}", text);
    assert!(warnings[0].contains("query resolved without a duration"));
    assert!(warnings[0].contains("query Localization"));
}
