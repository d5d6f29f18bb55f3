pub mod aggregate;

pub use aggregate::{period_bucket, EnrichedRecord, InventoryRecord, CRITICAL_STOCK_THRESHOLD};
