use std::{fs, path::Path};

#[cfg(feature = "tracing")]
use tracing::debug;

const SYS_CLASS_NET: &str = "/sys/class/net";
const MAX_NODE: u64 = (1 << 48) - 1;

/// Finds a hardware address to use as the node of time-based standard
/// identifiers.
///
/// Interfaces under `/sys/class/net` are visited in name order and the first
/// address that is neither zero nor broadcast wins. Returns `0` when none is
/// found, including on platforms without that directory.
pub fn discover_node() -> u64 {
    discover_node_in(Path::new(SYS_CLASS_NET))
}

pub(crate) fn discover_node_in(root: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(root) else {
        #[cfg(feature = "tracing")]
        debug!(root = %root.display(), "no network interfaces to inspect");
        return 0;
    };

    let mut interfaces: Vec<_> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
    interfaces.sort();

    for interface in interfaces {
        let Ok(address) = fs::read_to_string(interface.join("address")) else {
            continue;
        };
        if let Some(node) = parse_mac(&address).filter(|&mac| mac != 0 && mac < MAX_NODE) {
            #[cfg(feature = "tracing")]
            debug!(interface = %interface.display(), node, "discovered node");
            return node;
        }
    }
    0
}

/// Parses `aa:bb:cc:dd:ee:ff` (surrounding whitespace allowed).
pub(crate) fn parse_mac(text: &str) -> Option<u64> {
    let mut node = 0u64;
    let mut octets = 0;
    for part in text.trim().split(':') {
        if part.len() != 2 {
            return None;
        }
        node = (node << 8) | u64::from(u8::from_str_radix(part, 16).ok()?);
        octets += 1;
    }
    (octets == 6).then_some(node)
}
