//! Application module
//!
//! Configuration, logging setup, store initialization and fatal error
//! reporting for the `profitshare` binary.

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::{AppConfig, DEFAULT_BIND_ADDR};
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::open_configured_store;
