//! The built-in multiaddr patterns.
//!
//! Each constant is built on first use and then shared for the life of the
//! process. Composites hold handles to the same nodes, so `TCP` inside
//! `Reliable` is the very node exported as [`TCP`].

use once_cell::sync::Lazy;

use crate::pattern::{and, base, or, Pattern};

pub static DNS: Lazy<Pattern> = Lazy::new(|| base("dns"));

pub static IP: Lazy<Pattern> = Lazy::new(|| or([base("ip4"), base("ip6")]));

pub static TCP: Lazy<Pattern> = Lazy::new(|| and([IP.clone(), base("tcp")]));

pub static UDP: Lazy<Pattern> = Lazy::new(|| and([IP.clone(), base("udp")]));

pub static UTP: Lazy<Pattern> = Lazy::new(|| and([UDP.clone(), base("utp")]));

/// `and([DNS])` is a one-element sequence on purpose; a bare `dns` address
/// counts as HTTP.
pub static HTTP: Lazy<Pattern> = Lazy::new(|| {
    or([
        and([TCP.clone(), base("http")]),
        and([DNS.clone()]),
        and([DNS.clone(), base("http")]),
    ])
});

pub static WEB_SOCKETS: Lazy<Pattern> = Lazy::new(|| {
    or([
        and([TCP.clone(), base("ws")]),
        and([DNS.clone(), base("ws")]),
    ])
});

pub static WEB_SOCKETS_SECURE: Lazy<Pattern> = Lazy::new(|| {
    or([
        and([TCP.clone(), base("wss")]),
        and([DNS.clone(), base("wss")]),
    ])
});

pub static WEBRTC_STAR: Lazy<Pattern> = Lazy::new(|| {
    or([
        and([
            base("libp2p-webrtc-star"),
            WEB_SOCKETS.clone(),
            base("ipfs"),
        ]),
        and([
            base("libp2p-webrtc-star"),
            WEB_SOCKETS_SECURE.clone(),
            base("ipfs"),
        ]),
    ])
});

pub static WEBRTC_DIRECT: Lazy<Pattern> =
    Lazy::new(|| and([base("libp2p-webrtc-direct"), HTTP.clone()]));

/// Listed order is the tie-break order.
pub static RELIABLE: Lazy<Pattern> = Lazy::new(|| {
    or([
        WEB_SOCKETS.clone(),
        WEB_SOCKETS_SECURE.clone(),
        HTTP.clone(),
        WEBRTC_STAR.clone(),
        WEBRTC_DIRECT.clone(),
        TCP.clone(),
        UTP.clone(),
    ])
});

pub static IPFS: Lazy<Pattern> = Lazy::new(|| {
    or([
        and([RELIABLE.clone(), base("ipfs")]),
        WEBRTC_STAR.clone(),
    ])
});

/// Public names of the built-in patterns, in declaration order.
pub const ALL: [&str; 12] = [
    "DNS",
    "IP",
    "TCP",
    "UDP",
    "UTP",
    "HTTP",
    "WebSockets",
    "WebSocketsSecure",
    "WebRTCStar",
    "WebRTCDirect",
    "Reliable",
    "IPFS",
];

/// Look up a built-in pattern by its public name (`"WebSockets"`, `"IPFS"`).
pub fn lookup(name: &str) -> Option<&'static Pattern> {
    let pattern: &'static Lazy<Pattern> = match name {
        "DNS" => &DNS,
        "IP" => &IP,
        "TCP" => &TCP,
        "UDP" => &UDP,
        "UTP" => &UTP,
        "HTTP" => &HTTP,
        "WebSockets" => &WEB_SOCKETS,
        "WebSocketsSecure" => &WEB_SOCKETS_SECURE,
        "WebRTCStar" => &WEBRTC_STAR,
        "WebRTCDirect" => &WEBRTC_DIRECT,
        "Reliable" => &RELIABLE,
        "IPFS" => &IPFS,
        _ => return None,
    };
    Some(Lazy::force(pattern))
}

/// Names of every built-in pattern that fully matches `protos`.
pub fn classify<S: AsRef<str>>(protos: &[S]) -> Vec<&'static str> {
    ALL.iter()
        .copied()
        .filter(|name| lookup(name).is_some_and(|pattern| pattern.matches_protocols(protos)))
        .collect()
}
