pub mod dataset;
pub mod error;
pub mod filter;
pub mod ingest;

pub use dataset::Dataset;
pub use error::SourceError;
pub use filter::{RecordFilter, SupplierSelection};
pub use ingest::{load_inventory, parse_inventory, LoadedInventory};
