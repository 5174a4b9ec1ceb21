//! worktrack - local data layer and CLI for a work-hours tracker.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod holidays;
pub mod output;
pub mod state;
pub mod storage;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
