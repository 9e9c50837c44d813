pub mod aggregator;
pub mod orchestrator;

pub use aggregator::ChannelAggregator;
pub use orchestrator::Orchestrator;
