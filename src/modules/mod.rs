//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for external services like object storage, plus
//! in-memory stand-ins used by the test suite.

#[cfg(test)]
pub mod memory;
pub mod storage;
