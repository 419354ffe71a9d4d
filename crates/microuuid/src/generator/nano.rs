use std::time::SystemTime;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    NanoId, SystemClock, TimeSource,
    generator::{Generator, Sequence},
    host::process_id,
};

/// Generates [`NanoId`]s at second resolution.
///
/// With a 10-bit sequence, at most 1024 identifiers per second per process
/// are guaranteed distinct.
#[derive(Debug)]
pub struct NanoGenerator<T = SystemClock> {
    sequence: Sequence,
    process_id: u32,
    time: T,
}

impl NanoGenerator {
    /// A generator on the system clock.
    pub fn new() -> Self {
        Self::with_time(SystemClock)
    }
}

impl Default for NanoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> NanoGenerator<T> {
    /// A generator reading time from `time`.
    pub fn with_time(time: T) -> Self {
        Self {
            sequence: Sequence::new(NanoId::LAYOUT.width(1)),
            process_id: process_id(),
            time,
        }
    }

    /// The masked process id stamped into every identifier.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }
}

impl<T: TimeSource> Generator<NanoId> for NanoGenerator<T> {
    fn generate(&self) -> NanoId {
        self.generate_at(self.time.now())
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn generate_at(&self, time: SystemTime) -> NanoId {
        NanoId::from_time(time, self.sequence.next() as u16, self.process_id)
    }
}
