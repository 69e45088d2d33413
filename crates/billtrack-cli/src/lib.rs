//! Library side of the `billtrack` CLI: configuration, logging, the match
//! pipeline stages and summary rendering.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
