use rand::{Rng, rng};

/// A source of uniformly distributed random integers.
///
/// Only random ("version 4") standard identifiers draw from it. Tests plug in
/// a fixed source.
///
/// # Example
/// ```
/// use microuuid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn rand(&self) -> u128 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedRand.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Draws one uniformly distributed value.
    fn rand(&self) -> T;
}

/// A `RandSource` backed by `rand`'s thread-local generator.
///
/// The type is zero-sized and looks the generator up on every call, so it is
/// `Send + Sync` even though the generator itself is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}
