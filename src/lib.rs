pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod sink;
