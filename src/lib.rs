pub mod clock;
pub mod error;
pub mod log;
pub mod query;
pub mod request;
pub mod style;
pub mod timeline;

pub use timeline::event::{QueryTiming, TimingType};
pub use timeline::printer::TimelineReport;
pub use timeline::QueryTimeline;
