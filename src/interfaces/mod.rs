//! Adapters between files and the domain: CSV payments and verdicts, JSON limits.

pub mod config;
pub mod csv;
