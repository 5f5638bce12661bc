//! Core type definitions using newtype patterns for type safety.
//!
//! These types keep invalid port numbers and inverted ranges out of the
//! scanner entirely.

mod port;
mod target;

pub use port::{Port, PortError, PortRange};
pub use target::{AddressFamily, ResolvedTarget};
