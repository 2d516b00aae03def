pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod log;
pub mod model;
pub mod service;
pub mod shell;
pub mod store;

pub use crate::cli::Args;
pub use crate::config::ClinicConfig;
pub use crate::log::init;
pub use crate::service::Clinic;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub mod test_helpers;
