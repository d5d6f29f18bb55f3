pub mod charts;
pub mod insight;
pub mod service;
