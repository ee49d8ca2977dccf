//! Aggregate module - grouping, means and gender gaps

mod aggregator;
pub mod gap;

pub use aggregator::{AggregateRow, AggregateSpec, Aggregator};
pub use gap::{GapDataset, GapRow};
