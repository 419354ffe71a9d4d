/// Argument-level failures of the `microuuid` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid reference time {0:?}: expected UNIX_SECONDS[.MICROS]")]
    InvalidTime(String),

    #[error("--at cannot be combined with random (uuid4) identifiers")]
    TimeWithRandom,

    #[error("cannot tell which kind of identifier {0:?} is")]
    UnknownKind(String),
}
