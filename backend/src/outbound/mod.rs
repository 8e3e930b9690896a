//! Outbound adapters implementing the driven ports.
//!
//! Adapters are thin translators with no business logic. The only backing
//! store shipped here is the in-process one in [`memory`]; durable storage
//! plugs in by implementing the same port traits.

pub mod memory;
