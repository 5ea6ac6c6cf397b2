pub mod analysis;
pub mod config;
pub mod display;
pub mod export;
pub mod fetch;
pub mod import;
