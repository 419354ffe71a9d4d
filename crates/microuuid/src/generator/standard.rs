use std::{sync::OnceLock, time::SystemTime};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    RandSource, StandardId, SystemClock, ThreadRandom, TimeSource, VARIANT_RFC4122, VERSION_RANDOM,
    VERSION_TIME, discover_node,
    generator::{Generator, Sequence},
    rfc4122_timestamp,
};

/// Generates [`StandardId`]s, either time and node based (version 1) or
/// random (version 4).
///
/// Version 1 identifiers carry a 14-bit sequence under the RFC4122 variant
/// marker. The node is discovered from the host's network interfaces on
/// first use, or pinned with [`Self::set_node`].
///
/// # Example
/// ```
/// use microuuid::{StandardGenerator, VARIANT_RFC4122};
///
/// let generator = StandardGenerator::new();
/// generator.set_node(0x0242_ac11_0002);
///
/// let id = generator.v1();
/// assert_eq!(id.version(), 1);
/// assert_eq!(id.variant(), VARIANT_RFC4122);
/// assert_eq!(id.node(), 0x0242_ac11_0002);
///
/// let random = generator.v4();
/// assert_eq!(random.version(), 4);
/// ```
#[derive(Debug)]
pub struct StandardGenerator<T = SystemClock, R = ThreadRandom> {
    sequence: Sequence,
    node: OnceLock<u64>,
    time: T,
    rng: R,
}

impl StandardGenerator {
    /// A generator on the system clock and thread-local randomness.
    pub fn new() -> Self {
        Self::with_sources(SystemClock, ThreadRandom)
    }
}

impl Default for StandardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> StandardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    /// A generator reading time from `time` and random bits from `rng`.
    pub fn with_sources(time: T, rng: R) -> Self {
        Self {
            sequence: Sequence::new(15),
            node: OnceLock::new(),
            time,
            rng,
        }
    }

    /// Pins the 48-bit node. Returns `false` if a node was already set or
    /// discovered.
    pub fn set_node(&self, node: u64) -> bool {
        self.node.set(node & ((1 << 48) - 1)).is_ok()
    }

    /// The node stamped into version 1 identifiers, discovering it if needed.
    pub fn node(&self) -> u64 {
        *self.node.get_or_init(discover_node)
    }

    /// A time-based identifier for the current time.
    pub fn v1(&self) -> StandardId {
        self.v1_at(self.time.now())
    }

    /// A time-based identifier for `time`.
    pub fn v1_at(&self, time: SystemTime) -> StandardId {
        self.v1_with_timestamp(rfc4122_timestamp(time))
    }

    /// A time-based identifier for a raw 60-bit RFC4122 timestamp.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn v1_with_timestamp(&self, timestamp: u64) -> StandardId {
        let sequence = self.sequence.next() as u16 & (0x7fff >> VARIANT_RFC4122);
        StandardId::from_timestamp(
            timestamp,
            VERSION_TIME,
            VARIANT_RFC4122,
            sequence,
            self.node(),
        )
    }

    /// A random identifier. Every field except version and variant is drawn
    /// from the random source.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn v4(&self) -> StandardId {
        let bits: u128 = self.rng.rand();
        StandardId::from_fields(
            bits as u16,
            (bits >> 16) as u16,
            (bits >> 32) as u32 & 0x0fff_ffff,
            VERSION_RANDOM,
            VARIANT_RFC4122,
            (bits >> 60) as u16,
            (bits >> 76) as u32 & 0x00ff_ffff,
            (bits >> 100) as u32 & 0x00ff_ffff,
        )
    }
}

impl<T, R> Generator<StandardId> for StandardGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    fn generate(&self) -> StandardId {
        self.v1()
    }

    fn generate_at(&self, time: SystemTime) -> StandardId {
        self.v1_at(time)
    }
}
