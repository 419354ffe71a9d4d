use std::{
    io::Write,
    time::{SystemTime, UNIX_EPOCH},
};

use microuuid::{
    Generator, Identifier, MicroGenerator, MicroId, NanoGenerator, NanoId, StandardGenerator,
    StandardId, decode_base64, encode_hex_string,
};
use tracing::{debug, instrument};

use crate::cli::{
    config::{CliConfig, Command, Format, GenArgs, Kind},
    error::CliError,
};

/// Runs `command`, writing its report to `out`.
///
/// Returns `false` when the command ran but its verdict is negative (a
/// `validate` with at least one rejected value).
pub fn run<W: Write>(command: &Command, config: &CliConfig, out: &mut W) -> anyhow::Result<bool> {
    match command {
        Command::Gen(args) => generate(args, config, out).map(|()| true),
        Command::Inspect { values } => inspect(values, out).map(|()| true),
        Command::Validate { kind, values } => validate(*kind, values, out),
    }
}

#[instrument(level = "debug", skip(config, out))]
pub fn generate<W: Write>(args: &GenArgs, config: &CliConfig, out: &mut W) -> anyhow::Result<()> {
    match args.kind {
        Kind::Micro => {
            let generator = MicroGenerator::new().with_resolver(config.resolver.clone());
            debug!(server_id = generator.server_id(), "micro generator ready");
            emit(out, args, |at| match at {
                Some(time) => generator.generate_at(time),
                None => generator.generate(),
            })
        }
        Kind::Nano => {
            let generator = NanoGenerator::new();
            emit(out, args, |at| match at {
                Some(time) => generator.generate_at(time),
                None => generator.generate(),
            })
        }
        Kind::Uuid1 => {
            let generator = StandardGenerator::new();
            debug!(node = generator.node(), "standard generator ready");
            emit(out, args, |at| match at {
                Some(time) => generator.v1_at(time),
                None => generator.v1(),
            })
        }
        Kind::Uuid4 => {
            if args.at.is_some() {
                return Err(CliError::TimeWithRandom.into());
            }
            let generator = StandardGenerator::new();
            emit(out, args, |_| generator.v4())
        }
    }
}

fn emit<ID, W, F>(out: &mut W, args: &GenArgs, mut next: F) -> anyhow::Result<()>
where
    ID: Identifier,
    W: Write,
    F: FnMut(Option<SystemTime>) -> ID,
{
    for _ in 0..args.count {
        writeln!(out, "{}", render(&next(args.at), args.format))?;
    }
    Ok(())
}

pub fn render<ID: Identifier>(id: &ID, format: Format) -> String {
    match format {
        Format::String => id.encode(),
        Format::Base64 => id.to_base64(),
        Format::Hex => {
            let bytes = id.to_bytes();
            encode_hex_string(bytes.as_ref(), &[bytes.as_ref().len() * 2])
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detected {
    Micro(MicroId),
    Nano(NanoId),
    Standard(StandardId),
}

/// Recognises the grouped text form of each kind first, then falls back to
/// base64 and picks the kind by decoded width.
fn detect(value: &str) -> Result<Detected, CliError> {
    if MicroId::validate(value) {
        return Ok(Detected::Micro(MicroId::from_string(value)));
    }
    if NanoId::validate(value) {
        return Ok(Detected::Nano(NanoId::from_string(value)));
    }
    if StandardId::validate(value) {
        return Ok(Detected::Standard(StandardId::from_string(value)));
    }
    let bytes = decode_base64(value).unwrap_or_default();
    match bytes.len() {
        12 => Ok(Detected::Micro(MicroId::from_slice(&bytes))),
        8 => Ok(Detected::Nano(NanoId::from_slice(&bytes))),
        16 => Ok(Detected::Standard(StandardId::from_slice(&bytes))),
        _ => Err(CliError::UnknownKind(value.to_owned())),
    }
}

pub fn inspect<W: Write>(values: &[String], out: &mut W) -> anyhow::Result<()> {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match detect(value)? {
            Detected::Micro(id) => {
                writeln!(out, "kind: micro")?;
                common(out, &id)?;
                writeln!(out, "unix_seconds: {}", id.unix_seconds())?;
                writeln!(out, "micros: {}", id.micros())?;
                writeln!(out, "sequence: {}", id.sequence())?;
                writeln!(out, "process_id: {}", id.process_id())?;
                writeln!(out, "server_id: {}", id.server_id())?;
                writeln!(out, "time: {}", unix_time(id.time()))?;
                verdict(out, &id)?;
            }
            Detected::Nano(id) => {
                writeln!(out, "kind: nano")?;
                common(out, &id)?;
                writeln!(out, "timestamp: {}", id.timestamp())?;
                writeln!(out, "sequence: {}", id.sequence())?;
                writeln!(out, "process_id: {}", id.process_id())?;
                writeln!(out, "time: {}", unix_time(id.time()))?;
                verdict(out, &id)?;
            }
            Detected::Standard(id) => {
                writeln!(out, "kind: standard")?;
                common(out, &id)?;
                writeln!(out, "version: {}", id.version())?;
                writeln!(out, "variant: {}", id.variant())?;
                writeln!(out, "sequence: {}", id.sequence())?;
                writeln!(out, "node: {:012x}", id.node())?;
                writeln!(out, "timestamp: {}", id.timestamp())?;
                writeln!(out, "time: {}", unix_time(id.time()))?;
                verdict(out, &id)?;
            }
        }
    }
    Ok(())
}

fn common<ID: Identifier, W: Write>(out: &mut W, id: &ID) -> std::io::Result<()> {
    writeln!(out, "text: {}", id.encode())?;
    writeln!(out, "base64: {}", id.to_base64())
}

fn verdict<ID: Identifier, W: Write>(out: &mut W, id: &ID) -> std::io::Result<()> {
    writeln!(out, "valid: {}", id.is_valid())?;
    writeln!(out, "null: {}", id.is_null())
}

/// `SECONDS.MICROS` relative to the Unix epoch, negative before it.
fn unix_time(time: SystemTime) -> String {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{}.{:06}", d.as_secs(), d.subsec_micros()),
        Err(err) => {
            let d = err.duration();
            format!("-{}.{:06}", d.as_secs(), d.subsec_micros())
        }
    }
}

/// Prints `VALUE<TAB>ok|invalid` per value and returns whether all passed.
pub fn validate<W: Write>(kind: Kind, values: &[String], out: &mut W) -> anyhow::Result<bool> {
    let mut all = true;
    for value in values {
        let ok = match kind {
            Kind::Micro => MicroId::validate(value),
            Kind::Nano => NanoId::validate(value),
            Kind::Uuid1 | Kind::Uuid4 => StandardId::validate(value),
        };
        debug!(%value, ok, "validated");
        writeln!(out, "{value}\t{}", if ok { "ok" } else { "invalid" })?;
        all &= ok;
    }
    Ok(all)
}
