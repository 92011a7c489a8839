use std::sync::Arc;
use std::time::{Duration, Instant};

use query_timeline::log::{logger_with_context, LoggerOptions, SHOW_QUERY_TIMING_VAR};
use query_timeline::query::{QueryKey, QueryNameRegistry};
use query_timeline::request::{RenderType, ServerRequest};
use query_timeline::style::TimelineStyle;
use query_timeline::{QueryTimeline, TimingType};
use serde_json::json;
use tracing_subscriber::EnvFilter;

// Simulated backend latencies
const SHOP_MS: u64 = 40;
const PRODUCTS_MS: u64 = 90;
const REVIEWS_MS: u64 = 60;

type Timeline = Arc<QueryTimeline<QueryNameRegistry>>;

fn shop_key() -> QueryKey {
    QueryKey::new(vec![json!("shop"), json!({"body": "query Shop { shop { name } }"})])
}

fn products_key() -> QueryKey {
    QueryKey::new(vec![
        json!("products"),
        json!({"body": "query CollectionProducts($handle: String!) { collection(handle: $handle) { id } }"}),
    ])
}

fn reviews_key() -> QueryKey {
    QueryKey::from("/api/reviews")
}

/// Second render pass: the component asks again and gets the cached value.
fn render(timeline: &Timeline, request: &mut ServerRequest, key: &QueryKey) {
    timeline.collect(request, key, TimingType::Requested, None);
    timeline.collect(request, key, TimingType::Rendered, None);
}

async fn fetch(timeline: &Timeline, request: &mut ServerRequest, key: &QueryKey, latency: u64) {
    timeline.collect(request, key, TimingType::Requested, None);
    let started = Instant::now();
    tokio::time::sleep(Duration::from_millis(latency)).await;
    let took = started.elapsed().as_secs_f64() * 1000.0;
    timeline.collect(request, key, TimingType::Resolved, Some(took));
    render(timeline, request, key);
}

/// Every query waits on the one before it.
async fn sequential_page(timeline: Timeline, options: LoggerOptions) {
    let mut request = ServerRequest::new("http://localhost:3000/collections/freestyle");
    for (key, latency) in [
        (shop_key(), SHOP_MS),
        (products_key(), PRODUCTS_MS),
        (reviews_key(), REVIEWS_MS),
    ] {
        fetch(&timeline, &mut request, &key, latency).await;
    }

    let mut log = logger_with_context(&request, &options);
    if let Some(report) = timeline.print(RenderType::Ssr, &request, &mut log) {
        tracing::info!(request_id = %request.id, waterfalls = report.waterfalls, "sequential page done");
    }
}

/// All queries start before any of them resolves.
async fn parallel_page(timeline: Timeline, options: LoggerOptions) {
    let mut request = ServerRequest::new(
        "http://localhost:3000/__rsc?state=%7B%22pathname%22%3A%22%2Fproducts%22%2C%22search%22%3A%22%22%7D",
    );
    let queries = [
        (shop_key(), SHOP_MS),
        (products_key(), PRODUCTS_MS),
        (reviews_key(), REVIEWS_MS),
    ];

    for (key, _) in &queries {
        timeline.collect(&mut request, key, TimingType::Requested, None);
    }
    let started = Instant::now();
    tokio::join!(
        tokio::time::sleep(Duration::from_millis(queries[0].1)),
        tokio::time::sleep(Duration::from_millis(queries[1].1)),
        tokio::time::sleep(Duration::from_millis(queries[2].1)),
    );
    let took = started.elapsed().as_secs_f64() * 1000.0;
    for (key, _) in &queries {
        timeline.collect(&mut request, key, TimingType::Resolved, Some(took));
    }
    for (key, _) in &queries {
        render(&timeline, &mut request, key);
    }

    let mut log = logger_with_context(&request, &options);
    if let Some(report) = timeline.print(RenderType::Rsc, &request, &mut log) {
        tracing::info!(request_id = %request.id, waterfalls = report.waterfalls, "parallel page done");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("query_timeline=debug")),
        )
        .init();

    let mut options = LoggerOptions::from_env()?;
    if std::env::var(SHOW_QUERY_TIMING_VAR).is_err() {
        // the demo is pointless without it
        options.show_query_timing = true;
    }

    let registry = QueryNameRegistry::new();
    registry.register(&reviews_key(), "Product reviews");
    let timeline: Timeline = Arc::new(QueryTimeline::new(
        registry,
        TimelineStyle::for_color(options.color),
    ));

    tracing::info!("simulating two requests");
    let sequential = tokio::spawn(sequential_page(timeline.clone(), options.clone()));
    let parallel = tokio::spawn(parallel_page(timeline.clone(), options.clone()));
    sequential.await?;
    parallel.await?;

    Ok(())
}
