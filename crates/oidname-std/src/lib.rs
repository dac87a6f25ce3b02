//! oidname-std: Loading, caching, logging and CLI utilities
//!
//! This crate provides the std-only pieces around `oidname-core`: building
//! a tree from a definition list, a fingerprinted snapshot cache for fast
//! startup, and a bridge from resolution traces to the `tracing` ecosystem.

pub mod cache;
pub mod defs;
pub mod logging;

pub use oidname_core;
