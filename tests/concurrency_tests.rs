//! Concurrency and thread safety tests for the shared pattern graph

use std::sync::Arc;
use std::thread;

use mafmt::named::{self, IPFS, RELIABLE};
use mafmt::{and, base, or, PartialMatch, Pattern};

const STACKS: &[&[&str]] = &[
    &["ip4", "tcp"],
    &["dns", "wss"],
    &["ip4", "tcp", "ipfs"],
    &["ip6", "udp", "utp", "ipfs"],
    &["libp2p-webrtc-star", "dns", "ws", "ipfs"],
    &["libp2p-webrtc-direct", "dns"],
    &["onion3", "tcp"],
];

#[test]
fn concurrent_classify_on_named_patterns() {
    let expected: Vec<Vec<&str>> = STACKS.iter().map(|&s| named::classify(s)).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                STACKS
                    .iter()
                    .map(|&s| named::classify(s))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result, expected, "Thread {i} classified differently");
    }
}

#[test]
fn concurrent_first_use_of_named_patterns() {
    // Threads race to initialize the lazily built graph.
    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let addr = ["ip4", "tcp", "ipfs"];
                if i % 2 == 0 {
                    IPFS.matches_protocols(&addr)
                } else {
                    !RELIABLE.matches_protocols(&addr)
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn shared_custom_pattern_across_threads() {
    let quic: Pattern = and([named::UDP.clone(), base("quic")]);
    let transport = Arc::new(or([quic, named::TCP.clone()]));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let transport = Arc::clone(&transport);
            thread::spawn(move || {
                let addr: Vec<String> = if i % 2 == 0 {
                    vec!["ip4".into(), "udp".into(), "quic".into()]
                } else {
                    vec!["ip6".into(), "tcp".into(), "ws".into()]
                };
                match transport.partial_match(&addr) {
                    PartialMatch::NoMatch => None,
                    PartialMatch::Remainder(rest) => Some(rest.to_vec()),
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rest = handle.join().unwrap().expect("prefix matches");
        if i % 2 == 0 {
            assert!(rest.is_empty());
        } else {
            assert_eq!(rest, vec!["ws".to_string()]);
        }
    }
}

#[test]
fn patterns_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pattern>();
    assert_send_sync::<mafmt::Grammar>();
}
