pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod sink;

pub use metrics::{EnrichedRepository, MetricsCalculator};
pub use orchestrator::{Orchestrator, Stage};
pub use report::{RejectedRecord, RunReport};
pub use sink::JsonFileSink;
