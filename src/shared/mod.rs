pub mod constants;
pub mod generators;
pub mod time_format;
pub mod types;
