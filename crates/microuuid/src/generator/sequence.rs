use portable_atomic::{AtomicU32, Ordering};

/// A process-local counter that wraps within a fixed bit width.
///
/// Every call to [`Sequence::next`] yields a distinct value modulo
/// `2^bits`, even when called from many threads at once. The first value
/// handed out is `1`.
#[derive(Debug)]
pub struct Sequence {
    counter: AtomicU32,
    mask: u32,
}

impl Sequence {
    /// # Panics
    ///
    /// Panics if `bits` is zero or above 31.
    pub const fn new(bits: u32) -> Self {
        assert!(
            bits > 0 && bits < 32,
            "sequence width must be within 1..=31 bits"
        );
        Self {
            counter: AtomicU32::new(0),
            mask: (1 << bits) - 1,
        }
    }

    /// Advances the counter and returns the new value masked to its width.
    pub fn next(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1) & self.mask
    }

    pub const fn mask(&self) -> u32 {
        self.mask
    }
}
