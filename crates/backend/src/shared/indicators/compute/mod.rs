pub mod inventory;

pub use inventory::calculate_kpis;
