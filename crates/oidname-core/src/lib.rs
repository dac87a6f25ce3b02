//! oidname-core: OID parsing and MIB name resolution
//!
//! This crate turns numeric SNMP object identifiers into module-qualified
//! names (`1.3.6.1.4.1` → `SNMPv2-SMI::enterprises`) and back. It is
//! `no_std` compatible and IO-free; loading MIB data is left to the caller,
//! which builds a [`mib::MibTree`] once and then resolves against it from
//! any number of threads.
//!
//! # Pipeline
//!
//! ```text
//! "1.3.6.1.4.1.99" → Oid → walk (longest prefix) → abbreviate → "SNMPv2-SMI::enterprises.99"
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod mib;
pub mod oid;
pub mod resolve;

pub use mib::{MibRepository, MibTree, MibTreeBuilder};
pub use oid::{Oid, ParseOidError};
pub use resolve::{abbreviate, lookup, walk, LookupError, ResolvedNode};
