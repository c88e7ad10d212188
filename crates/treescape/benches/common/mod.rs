//! Shared helpers for benchmark suites.

pub mod criterion_config;
