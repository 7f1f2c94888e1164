//! Persistent error log sink
//!
//! Unexpected storage and lookup failures are written to the `error_logs`
//! table in the background so request handling never waits on them.

mod error_logger;

pub use error_logger::ErrorLogger;
