//! Facts about the running host that generators stamp into identifiers.
//!
//! None of these are on the hot path: generators resolve each one once and
//! cache it.

mod crc32;
mod node;
mod server_id;

pub use crc32::*;
pub use node::discover_node;
pub use server_id::*;

/// Bit mask applied to the OS process id before it is embedded.
pub const PROCESS_ID_MASK: u32 = (1 << 22) - 1;

/// The current OS process id, masked to the 22 bits identifiers carry.
pub fn process_id() -> u32 {
    std::process::id() & PROCESS_ID_MASK
}
