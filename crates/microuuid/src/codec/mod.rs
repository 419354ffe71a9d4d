mod base64;
mod bits;
mod hex;
mod interface;

pub use base64::*;
pub use bits::*;
pub use hex::*;
pub use interface::*;
