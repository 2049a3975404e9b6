//! Configuration loading

mod config;

pub use config::{CONFIG_DIR_ENV, Config};
