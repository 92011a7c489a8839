use tracing::{trace, warn};

use super::event::{QueryTiming, TimingType};
use super::QueryTimeline;
use crate::query::{hash_key, QueryKey, QueryNames};
use crate::request::ServerRequest;

impl<N: QueryNames> QueryTimeline<N> {
    /// Appends one lifecycle event to the request's timeline.
    pub fn collect(
        &self,
        request: &mut ServerRequest,
        query_key: &QueryKey,
        timing_type: TimingType,
        duration: Option<f64>,
    ) {
        let name = self.names.find_query_name(&hash_key(query_key));

        if timing_type == TimingType::Resolved && duration.is_none() {
            warn!(request_id = %request.id, query = %name, "query resolved without a duration");
        }
        trace!(request_id = %request.id, query = %name, phase = ?timing_type, "query timing");

        let timestamp = request.now();
        request.ctx.query_timings.push(QueryTiming {
            name,
            timing_type,
            timestamp,
            duration,
        });
    }
}
