use std::{sync::OnceLock, time::SystemTime};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    MicroId, ServerIdResolver, SystemClock, TimeSource,
    generator::{Generator, Sequence},
    host::process_id,
};

/// Generates [`MicroId`]s.
///
/// The server id is resolved lazily through a [`ServerIdResolver`] on first
/// use and cached for the generator's lifetime. It can be pinned beforehand
/// with [`Self::set_server_id`].
///
/// # Example
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use microuuid::{Generator, MicroGenerator};
///
/// let generator = MicroGenerator::new();
/// assert!(generator.set_server_id(0xbeef));
///
/// let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// let a = generator.generate_at(at);
/// let b = generator.generate_at(at);
///
/// assert_eq!(a.time(), b.time());
/// assert!(a < b);
/// assert_eq!(a.server_id(), 0xbeef);
/// ```
#[derive(Debug)]
pub struct MicroGenerator<T = SystemClock> {
    sequence: Sequence,
    server_id: OnceLock<u16>,
    resolver: ServerIdResolver,
    process_id: u32,
    time: T,
}

impl MicroGenerator {
    /// A generator on the system clock and the default resolver.
    pub fn new() -> Self {
        Self::with_time(SystemClock)
    }
}

impl Default for MicroGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> MicroGenerator<T> {
    /// A generator reading time from `time`.
    pub fn with_time(time: T) -> Self {
        Self {
            sequence: Sequence::new(MicroId::LAYOUT.width(3)),
            server_id: OnceLock::new(),
            resolver: ServerIdResolver::new(),
            process_id: process_id(),
            time,
        }
    }

    /// Uses `resolver` instead of the default one when the server id is
    /// first needed.
    pub fn with_resolver(mut self, resolver: ServerIdResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Pins the server id. Returns `false`, leaving the id unchanged, if it
    /// was already set or already resolved by an earlier generation.
    pub fn set_server_id(&self, server_id: u16) -> bool {
        self.server_id.set(server_id).is_ok()
    }

    /// The server id stamped into every identifier, resolving it if needed.
    pub fn server_id(&self) -> u16 {
        *self
            .server_id
            .get_or_init(|| self.resolver.resolve().value as u16)
    }

    /// The masked process id stamped into every identifier.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }
}

impl<T: TimeSource> Generator<MicroId> for MicroGenerator<T> {
    fn generate(&self) -> MicroId {
        self.generate_at(self.time.now())
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn generate_at(&self, time: SystemTime) -> MicroId {
        MicroId::from_time(
            time,
            self.sequence.next() as u8,
            self.process_id,
            self.server_id(),
        )
    }
}
