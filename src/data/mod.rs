//! Data module - CSV and topology loading

mod loader;
mod record;
mod topology;

pub use loader::{dataframe_to_records, load_records, DataLoader, LoaderError};
pub use record::{FieldValue, GroupKey, KeyPart, Record};
pub use topology::{Country, Ring, TopologyError, WorldTopology};
