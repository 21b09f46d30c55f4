//! Common utilities for mafmt benchmarks
//!
//! Sample protocol stacks covering every built-in pattern, plus a deep
//! grammar used to measure nested alternatives.

#![allow(dead_code)]

use mafmt::{and, base, or, Pattern};

/// Decoded protocol stacks, roughly ordered from shallow to deep.
pub const SAMPLE_ADDRS: &[&[&str]] = &[
    &["dns"],
    &["ip4", "tcp"],
    &["ip6", "udp", "utp"],
    &["ip4", "tcp", "ws"],
    &["dns", "wss"],
    &["ip4", "tcp", "http"],
    &["ip4", "tcp", "ipfs"],
    &["ip4", "udp", "utp", "ipfs"],
    &["libp2p-webrtc-direct", "ip4", "tcp", "http"],
    &["libp2p-webrtc-star", "ip4", "tcp", "ws", "ipfs"],
    &["libp2p-webrtc-star", "dns", "wss", "ipfs"],
    &["onion3"],
];

/// Alternatives of `width` two-token sequences where only the last branch
/// matches `["hit", "end"]`.
pub fn wide_alternative(width: usize) -> Pattern {
    or((0..width).map(|i| {
        let head = if i + 1 == width {
            "hit".to_string()
        } else {
            format!("miss-{i}")
        };
        and([base(head), base("end")])
    }))
}

/// A sequence of `depth` nested single-child sequences around `base("x")`.
pub fn deep_sequence(depth: usize) -> Pattern {
    (0..depth).fold(base("x"), |inner, _| and([inner]))
}
