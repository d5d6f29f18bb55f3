pub mod aggregate;
pub mod config;
pub mod data;
pub mod format;
pub mod indicators;
