//! Data models: statement records and pipeline configuration.

pub mod config;
pub mod record;
