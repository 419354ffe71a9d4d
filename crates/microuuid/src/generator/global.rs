//! Process-wide default generators.
//!
//! Each default is created on first use and lives for the rest of the
//! process. They are thread-safe: counters are atomic and one-time
//! resolution of the server id and node happens exactly once.

use std::{sync::OnceLock, time::SystemTime};

use crate::{
    Generator, MicroGenerator, MicroId, NanoGenerator, NanoId, StandardGenerator, StandardId,
};

fn micro() -> &'static MicroGenerator {
    static GENERATOR: OnceLock<MicroGenerator> = OnceLock::new();
    GENERATOR.get_or_init(MicroGenerator::new)
}

fn nano() -> &'static NanoGenerator {
    static GENERATOR: OnceLock<NanoGenerator> = OnceLock::new();
    GENERATOR.get_or_init(NanoGenerator::new)
}

fn standard() -> &'static StandardGenerator {
    static GENERATOR: OnceLock<StandardGenerator> = OnceLock::new();
    GENERATOR.get_or_init(StandardGenerator::new)
}

/// Generates a [`MicroId`] for the current time with the default generator.
///
/// ```
/// use microuuid::Identifier;
///
/// let id = microuuid::micro_id();
/// assert!(id.is_ok());
/// assert!(microuuid::MicroId::validate(&id.to_string()));
/// ```
pub fn micro_id() -> MicroId {
    micro().generate()
}

/// A [`MicroId`] for `time` from the default generator.
pub fn micro_id_at(time: SystemTime) -> MicroId {
    micro().generate_at(time)
}

/// A [`NanoId`] for the current time from the default generator.
pub fn nano_id() -> NanoId {
    nano().generate()
}

/// A [`NanoId`] for `time` from the default generator.
pub fn nano_id_at(time: SystemTime) -> NanoId {
    nano().generate_at(time)
}

/// A time-based [`StandardId`] from the default generator.
pub fn uuid1() -> StandardId {
    standard().v1()
}

/// A time-based [`StandardId`] for `time` from the default generator.
pub fn uuid1_at(time: SystemTime) -> StandardId {
    standard().v1_at(time)
}

/// A random [`StandardId`].
pub fn uuid4() -> StandardId {
    standard().v4()
}

/// Pins the server id of the default micro generator.
///
/// Only the first call before any [`micro_id`] takes effect; it returns
/// `false` once the id is fixed, whether by an earlier call or by
/// resolution on first generation.
pub fn set_default_server_id(server_id: u16) -> bool {
    micro().set_server_id(server_id)
}
