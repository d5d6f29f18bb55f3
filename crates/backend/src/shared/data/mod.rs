pub mod source_cache;

pub use source_cache::SourceCache;
