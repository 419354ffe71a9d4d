use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use microuuid::{MACHINE_ID_PATH, ServerIdResolver};

use crate::cli::error::CliError;

/// Command-line and environment configuration for the `microuuid` binary.
///
/// Global flags other than `--server-id` can also come from the environment
/// (or a `.env` file loaded before parsing).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "microuuid",
    version,
    about = "Generate, inspect and validate sortable micro, nano and RFC4122 identifiers"
)]
pub struct CliArgs {
    /// Server id stamped into micro identifiers.
    ///
    /// Only the low 16 bits are kept. When unset, the resolver tries the
    /// `SERVER_ID` environment variable, then the machine-id file, then the
    /// host name. A non-integer `SERVER_ID` is skipped there with a warning.
    #[arg(long, global = true)]
    pub server_id: Option<u32>,

    /// File hashed into the server id when no explicit id is given.
    ///
    /// Environment variable: `MICROUUID_MACHINE_ID_PATH`
    #[arg(
        long,
        env = "MICROUUID_MACHINE_ID_PATH",
        default_value = MACHINE_ID_PATH,
        global = true
    )]
    pub machine_id_path: PathBuf,

    /// Log filter directives, written to stderr.
    ///
    /// Environment variable: `RUST_LOG`
    #[arg(long = "log", env = "RUST_LOG", default_value = "warn", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate new identifiers, one per line.
    Gen(GenArgs),

    /// Decode identifiers (text or base64) and print their fields.
    Inspect {
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Check that every value is well-formed text of the given kind.
    ///
    /// Exits with a non-zero status if any value is not.
    Validate {
        #[arg(long, value_enum)]
        kind: Kind,

        #[arg(required = true)]
        values: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenArgs {
    #[arg(long, value_enum, default_value_t = Kind::Micro)]
    pub kind: Kind,

    /// How many identifiers to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, value_enum, default_value_t = Format::String)]
    pub format: Format,

    /// Reference time instead of the current clock, as
    /// `UNIX_SECONDS[.MICROS]`.
    #[arg(long, value_parser = parse_reference_time)]
    pub at: Option<SystemTime>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Micro,
    Nano,
    Uuid1,
    Uuid4,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Grouped hex, e.g. `6553f100-01c01092`.
    String,
    Base64,
    /// The binary form as plain hex.
    Hex,
}

/// Settings derived from [`CliArgs`] that the commands run with.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub resolver: ServerIdResolver,
    pub log: String,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        let mut resolver = ServerIdResolver::new().with_machine_id_path(&args.machine_id_path);
        if let Some(server_id) = args.server_id {
            resolver = resolver.with_override(server_id);
        }
        Self {
            resolver,
            log: args.log.clone(),
        }
    }
}

/// Parses `UNIX_SECONDS[.MICROS]`. The fraction has at most six digits and
/// is right-padded, so `.5` means 500 000 microseconds.
pub fn parse_reference_time(s: &str) -> Result<SystemTime, CliError> {
    let invalid = || CliError::InvalidTime(s.to_owned());
    let (seconds, fraction) = s.split_once('.').unwrap_or((s, ""));

    let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
    if fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let micros = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<6}").parse().map_err(|_| invalid())?
    };

    let offset = Duration::from_secs(seconds) + Duration::from_micros(micros);
    Ok(UNIX_EPOCH + offset)
}

#[cfg(test)]
mod tests {
    use microuuid::{SERVER_ID_ENV, ServerIdSource};

    use super::*;

    fn parses(args: &[&str]) -> bool {
        CliArgs::try_parse_from(args.iter().copied()).is_ok()
    }

    #[test]
    fn reference_time_accepts_fractions() {
        assert_eq!(
            parse_reference_time("1700000000").unwrap(),
            UNIX_EPOCH + Duration::from_secs(1_700_000_000)
        );
        assert_eq!(
            parse_reference_time("1700000000.5").unwrap(),
            UNIX_EPOCH + Duration::from_micros(1_700_000_000_500_000)
        );
        assert_eq!(
            parse_reference_time("0.000001").unwrap(),
            UNIX_EPOCH + Duration::from_micros(1)
        );
    }

    #[test]
    fn reference_time_rejects_garbage() {
        for s in ["", "abc", "1.2345678", "1.-5", "-1", "1.2.3"] {
            assert!(parse_reference_time(s).is_err(), "{s:?}");
        }
    }

    #[test]
    fn gen_defaults() {
        let args = CliArgs::try_parse_from(["microuuid", "gen"]).unwrap();
        let Command::Gen(gen_args) = args.command else {
            panic!("expected gen");
        };
        assert_eq!(gen_args.kind, Kind::Micro);
        assert_eq!(gen_args.count, 1);
        assert_eq!(gen_args.format, Format::String);
        assert!(gen_args.at.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "microuuid",
            "gen",
            "--kind",
            "uuid1",
            "-n",
            "3",
            "--server-id",
            "9",
            "--at",
            "12.25",
        ])
        .unwrap();
        assert_eq!(args.server_id, Some(9));
        let Command::Gen(gen_args) = &args.command else {
            panic!("expected gen");
        };
        assert_eq!(gen_args.kind, Kind::Uuid1);
        assert_eq!(gen_args.count, 3);
        assert_eq!(
            gen_args.at,
            Some(UNIX_EPOCH + Duration::from_micros(12_250_000))
        );

        let config = CliConfig::from(&args);
        assert_eq!(config.resolver.resolve().value, 9);
    }

    #[test]
    fn validate_requires_kind_and_values() {
        assert!(!parses(&["microuuid", "validate", "x"]));
        assert!(!parses(&["microuuid", "validate", "--kind", "nano"]));
        assert!(parses(&["microuuid", "validate", "--kind", "nano", "x"]));
    }

    #[test]
    fn non_integer_server_id_env_is_left_to_resolver() {
        // SAFETY: no other test in this binary reads or writes SERVER_ID.
        unsafe { std::env::set_var(SERVER_ID_ENV, "web-01") };
        let args = CliArgs::try_parse_from([
            "microuuid",
            "validate",
            "--kind",
            "nano",
            "00000000-00000000",
        ]);
        let source = args
            .as_ref()
            .ok()
            .map(|args| CliConfig::from(args).resolver.resolve().source);
        unsafe { std::env::remove_var(SERVER_ID_ENV) };

        let args = args.unwrap();
        assert_eq!(args.server_id, None);
        assert_ne!(source, Some(ServerIdSource::Environment));
        let Command::Validate { kind, .. } = args.command else {
            panic!("expected validate");
        };
        assert_eq!(kind, Kind::Nano);
    }
}
