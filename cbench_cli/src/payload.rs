use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;

/// Read the whole benchmark payload from `input`, or from stdin when `input`
/// is `-`.
pub fn read_payload(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("reading payload from stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("reading payload file {:?}", input))
    }
}

const HOSTS: &[&str] = &["worker-01", "worker-02", "worker-03", "edge-a", "edge-b"];
const COMPONENTS: &[&str] = &[
    "hive-server2",
    "hive-metastore",
    "yarn-nodemanager",
    "hdfs-datanode",
    "tez-am",
    "zookeeper",
];
const EXTENSIONS: &[&str] = &["log", "log.1", "out", "gc.log", "audit.log"];

/// One deterministic file-listing entry: path, size, and mtime, tab separated.
fn listing_line(i: u64) -> String {
    let host = HOSTS[(i as usize * 3 + 1) % HOSTS.len()];
    let component = COMPONENTS[(i as usize * 7 + 2) % COMPONENTS.len()];
    let ext = EXTENSIONS[(i as usize * 5 + 3) % EXTENSIONS.len()];
    let hour = (i / 40) % 24;
    let size = (i * 7919 + 1031) % 50_000_000;
    let mtime = 1_700_000_000 + i * 37;
    format!("/samples/hive-24hr/{hour:02}/{host}/{component}-{i:06}.{ext}\t{size}\t{mtime}\n")
}

/// Build exactly `len` bytes of synthetic file-listing text.
///
/// The same `len` always yields the same bytes, so runs are comparable.
pub fn synthetic_payload(len: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(len + 128);
    let mut i = 0u64;
    while buf.len() < len {
        buf.extend_from_slice(listing_line(i).as_bytes());
        i += 1;
    }
    buf.truncate(len);
    buf
}
