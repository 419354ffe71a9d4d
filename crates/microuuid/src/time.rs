use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Number of 100 ns intervals between the Gregorian reform
/// (1582-10-15 00:00:00 UTC) and the Unix epoch. RFC4122 time-based
/// identifiers count from the former.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// A source of wall-clock time.
///
/// Generators read the clock through this trait so tests can pin it to a
/// fixed instant.
///
/// # Example
///
/// ```
/// use std::time::{Duration, SystemTime, UNIX_EPOCH};
/// use microuuid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> SystemTime {
///         UNIX_EPOCH + Duration::from_secs(1234)
///     }
/// }
///
/// assert_eq!(FixedTime.now(), UNIX_EPOCH + Duration::from_secs(1234));
/// ```
pub trait TimeSource {
    /// The current time.
    fn now(&self) -> SystemTime;
}

/// The operating system's real-time clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

/// Splits `time` into whole Unix seconds (floored, so negative before 1970)
/// and the microseconds past that second.
pub(crate) fn unix_parts(time: SystemTime) -> (i64, u32) {
    let micros = unix_micros(time);
    (
        micros.div_euclid(1_000_000) as i64,
        micros.rem_euclid(1_000_000) as u32,
    )
}

/// Signed microseconds since the Unix epoch.
pub(crate) fn unix_micros(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_micros() as i128,
        Err(before) => -(before.duration().as_micros() as i128),
    }
}

/// Inverse of [`unix_micros`].
pub(crate) fn from_unix_micros(micros: i64) -> SystemTime {
    let magnitude = Duration::from_micros(micros.unsigned_abs());
    if micros >= 0 {
        UNIX_EPOCH + magnitude
    } else {
        UNIX_EPOCH - magnitude
    }
}
