mod global;
mod interface;
mod micro;
mod nano;
mod sequence;
mod standard;

pub use global::*;
pub use interface::*;
pub use micro::*;
pub use nano::*;
pub use sequence::*;
pub use standard::*;
