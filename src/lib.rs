//! # profitshare
//!
//! Splits a business's net profit between the company and its members, and
//! keeps a history of saved calculations.
//!
//! ## Usage
//!
//! ```bash
//! profitshare compute input.json
//! profitshare save input.json
//! profitshare history --limit 5
//! profitshare serve --bind 127.0.0.1:5000
//! ```
//!
//! ## Modules
//!
//! - `calculator` - Pure profit-sharing engine, input validation and the legacy fixed-field input
//! - `storage` - Calculation store over pluggable memory and file backends
//! - `api` - JSON API exposing compute, save, lookup and history
//! - `app` - Configuration, logging and fatal error handling for the binary
//! - `error` - Application error type with stable codes and exit statuses
pub mod api;
pub mod app;
pub mod calculator;
pub mod error;
pub mod storage;
