//! Multiaddr format patterns (`mafmt`).
//!
//! This crate classifies and validates multiaddrs by the shape of their
//! protocol stack. A pattern is built from three primitives:
//!
//! - [`base`]: exactly one protocol token (`tcp`, `ws`, ...).
//! - [`and`]: an ordered sequence; each child consumes a prefix of what the
//!   previous child left behind.
//! - [`or`]: ordered alternatives; the first child that matches a prefix wins.
//!
//! The [`named`] module exports the standard patterns (`TCP`, `WEB_SOCKETS`,
//! `IPFS`, ...) and [`config`] compiles additional ones from YAML or JSON
//! grammar files.
//!
//! ## Partial and full matches
//!
//! [`Pattern::partial_match`] consumes a prefix and reports the unconsumed
//! tail as [`PartialMatch::Remainder`], or [`PartialMatch::NoMatch`]. A full
//! match ([`Pattern::matches`], [`Pattern::matches_protocols`]) is a partial
//! match that leaves nothing behind.
//!
//! Sequences are greedy and never backtrack: if an earlier child's prefix
//! leaves a tail that later children cannot consume, the sequence fails even
//! if a different split would have worked.
//!
//! ## Address decoding
//!
//! Patterns never parse addresses. [`Pattern::matches`] asks the input for
//! its protocol names through [`ProtoNames`], which is implemented for token
//! slices and, with the `multiaddr` feature, for `multiaddr::Multiaddr` and
//! address strings. Decoding errors come back unchanged.
//!
//! ## Example
//!
//! ```
//! use mafmt::named::{IPFS, RELIABLE, TCP};
//! use mafmt::PartialMatch;
//!
//! let addr = ["ip4", "tcp", "ipfs"];
//!
//! assert!(IPFS.matches_protocols(&addr));
//! assert!(!RELIABLE.matches_protocols(&addr));
//! assert_eq!(TCP.partial_match(&addr), PartialMatch::Remainder(&["ipfs"][..]));
//! ```
//!
//! ## Thread safety
//!
//! Patterns are immutable once built and carry no caches or counters, so the
//! named patterns can be matched from any number of threads at once.

pub mod config;
mod engine;
mod error;
pub mod named;
mod pattern;
mod types;

pub use crate::config::{Grammar, GrammarConfig, PatternExpr};
pub use crate::error::GrammarError;
pub use crate::pattern::{and, base, or, Pattern, PatternKind};
pub use crate::types::{PartialMatch, ProtoNames};
