//! Modules layer - Infrastructure components shared by features
//!
//! Contains adapters for cross-cutting infrastructure such as the persistent error log.

pub mod logging;
