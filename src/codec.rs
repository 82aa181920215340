#![cfg(feature = "std")]

//! Binary encoding of match snapshots for suspend/resume.

use crate::engine::snapshot::MatchSnapshot;

/// Upper bound on an encoded snapshot; two 10×10 grids plus fleets fit easily.
pub const MAX_SNAPSHOT_BYTES: u64 = 64 * 1024;

pub fn encode_snapshot(snapshot: &MatchSnapshot) -> anyhow::Result<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

/// Decode a snapshot, refusing oversized or malformed input.
pub fn decode_snapshot(bytes: &[u8]) -> anyhow::Result<MatchSnapshot> {
    use bincode::Options;

    if bytes.len() as u64 > MAX_SNAPSHOT_BYTES {
        anyhow::bail!("Snapshot of {} bytes exceeds {} byte limit", bytes.len(), MAX_SNAPSHOT_BYTES);
    }
    let snapshot = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_SNAPSHOT_BYTES)
        .deserialize(bytes)?;
    Ok(snapshot)
}
