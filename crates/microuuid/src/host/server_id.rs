use std::{
    fs,
    path::{Path, PathBuf},
};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::crc32;

/// Environment variable holding a numeric server id.
///
/// The value is read as a signed 64-bit integer and wrapped to 32 bits, so
/// `-1` resolves to `0xffff_ffff`.
pub const SERVER_ID_ENV: &str = "SERVER_ID";

/// File whose contents identify the machine on most Linux systems.
pub const MACHINE_ID_PATH: &str = "/etc/machine-id";

/// Where a resolved [`ServerId`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerIdSource {
    /// Set explicitly on the resolver.
    Override,
    /// Parsed from the configured environment variable and wrapped to 32
    /// bits.
    Environment,
    /// CRC-32 of the machine-id file.
    MachineId,
    /// CRC-32 of the host descriptor.
    HostDescriptor,
}

/// A 32-bit host identity. Micro identifiers keep its low 16 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ServerId {
    pub value: u32,
    pub source: ServerIdSource,
}

/// Resolves the identity of the current host.
///
/// Sources are tried in a fixed order:
///
/// 1. an explicit override
/// 2. an integer environment variable ([`SERVER_ID_ENV`] by default)
/// 3. the CRC-32 of a machine-id file ([`MACHINE_ID_PATH`] by default)
/// 4. the CRC-32 of a host descriptor (hostname, OS and architecture)
///
/// Resolution never fails; the last source always produces a value.
///
/// # Example
///
/// ```
/// use microuuid::{ServerIdResolver, ServerIdSource};
///
/// let id = ServerIdResolver::new()
///     .with_env_lookup(|_| None)
///     .with_machine_id_path("/nonexistent")
///     .with_host_descriptor("build-host linux x86_64")
///     .resolve();
///
/// assert_eq!(id.source, ServerIdSource::HostDescriptor);
/// assert_eq!(id.value, microuuid::crc32(b"build-host linux x86_64"));
/// ```
#[derive(Clone, Debug)]
pub struct ServerIdResolver {
    override_id: Option<u32>,
    env_var: String,
    env_lookup: fn(&str) -> Option<String>,
    machine_id_path: PathBuf,
    host_descriptor: Option<String>,
}

impl Default for ServerIdResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerIdResolver {
    /// A resolver reading [`SERVER_ID_ENV`] and [`MACHINE_ID_PATH`].
    pub fn new() -> Self {
        Self {
            override_id: None,
            env_var: SERVER_ID_ENV.to_owned(),
            env_lookup: |name| std::env::var(name).ok(),
            machine_id_path: PathBuf::from(MACHINE_ID_PATH),
            host_descriptor: None,
        }
    }

    /// Short-circuits every other source.
    pub fn with_override(mut self, id: u32) -> Self {
        self.override_id = Some(id);
        self
    }

    /// Reads the server id from `name` instead of [`SERVER_ID_ENV`].
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Replaces the process environment as the source of variables.
    pub fn with_env_lookup(mut self, lookup: fn(&str) -> Option<String>) -> Self {
        self.env_lookup = lookup;
        self
    }

    /// Hashes `path` instead of [`MACHINE_ID_PATH`].
    pub fn with_machine_id_path(mut self, path: impl AsRef<Path>) -> Self {
        self.machine_id_path = path.as_ref().to_path_buf();
        self
    }

    /// Replaces the descriptor built by [`host_descriptor`].
    pub fn with_host_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.host_descriptor = Some(descriptor.into());
        self
    }

    /// Tries each source in order and reports the first that yields a value.
    pub fn resolve(&self) -> ServerId {
        if let Some(value) = self.override_id {
            return self.resolved(value, ServerIdSource::Override);
        }

        if let Some(raw) = (self.env_lookup)(&self.env_var) {
            match raw.trim().parse::<i64>() {
                Ok(value) => return self.resolved(value as u32, ServerIdSource::Environment),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    warn!(
                        var = %self.env_var,
                        value = %raw,
                        error = %_err,
                        "ignoring non-integer server id"
                    );
                }
            }
        }

        match fs::read(&self.machine_id_path) {
            Ok(contents) => {
                return self.resolved(crc32(&contents), ServerIdSource::MachineId);
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                debug!(
                    path = %self.machine_id_path.display(),
                    error = %_err,
                    "machine id unavailable"
                );
            }
        }

        let descriptor = match &self.host_descriptor {
            Some(descriptor) => descriptor.clone(),
            None => host_descriptor(),
        };
        self.resolved(crc32(descriptor.as_bytes()), ServerIdSource::HostDescriptor)
    }

    fn resolved(&self, value: u32, source: ServerIdSource) -> ServerId {
        #[cfg(feature = "tracing")]
        debug!(value, ?source, "resolved server id");
        ServerId { value, source }
    }
}

/// A string describing this host: hostname, OS and CPU architecture.
pub fn host_descriptor() -> String {
    format!(
        "{} {} {}",
        hostname(),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn hostname() -> String {
    let files = ["/proc/sys/kernel/hostname", "/etc/hostname"];
    let vars = ["HOSTNAME", "COMPUTERNAME"];
    files
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .chain(vars.iter().filter_map(|var| std::env::var(var).ok()))
        .map(|name| name.trim().to_owned())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("microuuid-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn override_wins() {
        let id = ServerIdResolver::new()
            .with_override(7)
            .with_env_lookup(|_| Some("9".into()))
            .resolve();
        assert_eq!(
            id,
            ServerId {
                value: 7,
                source: ServerIdSource::Override
            }
        );
    }

    #[test]
    fn numeric_env_is_used_verbatim() {
        let id = ServerIdResolver::new()
            .with_env_lookup(|name| (name == SERVER_ID_ENV).then(|| " 4242\n".into()))
            .resolve();
        assert_eq!(id.value, 4242);
        assert_eq!(id.source, ServerIdSource::Environment);
    }

    #[test]
    fn custom_env_var_name() {
        let id = ServerIdResolver::new()
            .with_env_var("NODE_ID")
            .with_env_lookup(|name| (name == "NODE_ID").then(|| "12".into()))
            .resolve();
        assert_eq!(id.value, 12);
    }

    #[test]
    fn negative_env_wraps_to_32_bits() {
        let id = ServerIdResolver::new()
            .with_env_lookup(|_| Some("-1".into()))
            .resolve();
        assert_eq!(id.value, 0xffff_ffff);
        assert_eq!(id.source, ServerIdSource::Environment);
    }

    #[test]
    fn oversized_env_keeps_low_32_bits() {
        let id = ServerIdResolver::new()
            .with_env_lookup(|_| Some("4294967297".into()))
            .resolve();
        assert_eq!(id.value, 1);
        assert_eq!(id.source, ServerIdSource::Environment);
    }

    #[test]
    fn machine_id_is_hashed_with_its_newline() {
        let path = temp_file("machine-id", b"test\n");
        let id = ServerIdResolver::new()
            .with_env_lookup(|_| Some("not-a-number".into()))
            .with_machine_id_path(&path)
            .resolve();
        fs::remove_file(&path).unwrap();
        assert_eq!(id.value, crc32(b"test\n"));
        assert_eq!(id.source, ServerIdSource::MachineId);
    }

    #[test]
    fn falls_back_to_host_descriptor() {
        let id = ServerIdResolver::new()
            .with_env_lookup(no_env)
            .with_machine_id_path("/definitely/not/here")
            .with_host_descriptor("test")
            .resolve();
        assert_eq!(id.value, crc32(b"test"));
        assert_eq!(id.source, ServerIdSource::HostDescriptor);
    }

    #[test]
    fn default_descriptor_mentions_platform() {
        let descriptor = host_descriptor();
        assert!(descriptor.ends_with(std::env::consts::ARCH));
        assert!(descriptor.contains(std::env::consts::OS));
    }
}
