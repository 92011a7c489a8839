use std::sync::Arc;

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::clock::{Clock, MonotonicClock};
use crate::timeline::event::QueryTiming;

/// Which rendering path produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderType {
    /// Server-side rendered HTML
    Ssr,
    /// Server components payload
    Rsc,
    /// Streamed HTML
    Str,
    Api,
}

/// Per-request scratch space. Lives exactly as long as the request.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub query_timings: Vec<QueryTiming>,
}

pub struct ServerRequest {
    pub id: Uuid,
    pub url: String,
    /// Start time, in the clock's milliseconds.
    pub time: f64,
    pub ctx: RequestContext,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ServerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerRequest")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("time", &self.time)
            .field("ctx", &self.ctx)
            .finish()
    }
}

impl ServerRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_clock(url, Arc::new(MonotonicClock))
    }

    pub fn with_clock(url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let time = clock.now_ms();
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            time,
            ctx: RequestContext::default(),
            clock,
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.now_ms()
    }
}

#[derive(Debug, Deserialize)]
struct RscState {
    #[serde(default)]
    pathname: String,
    #[serde(default)]
    search: String,
}

/// Label for the page being rendered. Server component requests carry the
/// real page location as JSON in their `state` parameter.
pub fn parse_url(render_type: RenderType, url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    if render_type == RenderType::Rsc {
        let state = parsed
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned());
        if let Some(state) = state.and_then(|s| serde_json::from_str::<RscState>(&s).ok()) {
            return format!("{}{}", state.pathname, state.search);
        }
    }

    match parsed.query() {
        Some(query) => format!("{}?{}", parsed.path(), query),
        None => parsed.path().to_string(),
    }
}
