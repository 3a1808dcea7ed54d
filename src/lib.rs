pub mod chart_spec;
pub mod colors;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod selection;
pub mod state;
pub mod views;
