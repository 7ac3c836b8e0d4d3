//! Data models for receipts and configuration.

pub mod config;
pub mod receipt;
