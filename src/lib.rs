pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod operations;
pub mod payload;
