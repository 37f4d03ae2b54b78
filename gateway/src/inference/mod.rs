pub mod providers;
pub mod types;
