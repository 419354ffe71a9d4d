use std::time::SystemTime;

/// A source of new identifiers of kind `ID`.
///
/// Implementations never fail and never block: each call stamps a time and
/// advances a process-local sequence, so two identifiers generated for the
/// same instant still differ and sort in generation order (until the
/// sequence wraps).
pub trait Generator<ID> {
    /// Generates an identifier for the current time.
    fn generate(&self) -> ID;

    /// Generates an identifier for `time`. The sequence still advances.
    fn generate_at(&self, time: SystemTime) -> ID;
}
