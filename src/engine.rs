//! Prefix matching over protocol token sequences.
//!
//! Everything here is a pure function of the pattern and the input slice:
//! no allocation on the match path, no caches, no shared mutable state.

use tracing::trace;

use crate::pattern::{Pattern, PatternKind};
use crate::types::{PartialMatch, ProtoNames};


impl Pattern {
    /// Consume the prefix of `protos` this pattern describes.
    ///
    /// - A base pattern consumes exactly the first token when it equals its
    ///   name. Empty input never matches.
    /// - A sequence rejects inputs shorter than its child count, then feeds
    ///   each child the tail left by the previous one. The split is greedy:
    ///   there is no retry with a different split when a later child fails.
    /// - An alternative returns the first child result that is not
    ///   [`PartialMatch::NoMatch`], even if a later child would leave less
    ///   behind.
    pub fn partial_match<'a, S: AsRef<str>>(&self, protos: &'a [S]) -> PartialMatch<'a, S> {
        match self.kind() {
            PatternKind::Base(name) => match protos.split_first() {
                Some((first, rest)) if first.as_ref() == name.as_str() => {
                    PartialMatch::Remainder(rest)
                }
                _ => PartialMatch::NoMatch,
            },
            PatternKind::And(children) => {
                // Every child consumes at least one token.
                if protos.len() < children.len() {
                    return PartialMatch::NoMatch;
                }
                let mut rest = protos;
                for child in children {
                    match child.partial_match(rest) {
                        PartialMatch::Remainder(tail) => rest = tail,
                        PartialMatch::NoMatch => return PartialMatch::NoMatch,
                    }
                }
                PartialMatch::Remainder(rest)
            }
            PatternKind::Or(children) => children
                .iter()
                .map(|child| child.partial_match(protos))
                .find(PartialMatch::is_match)
                .unwrap_or(PartialMatch::NoMatch),
        }
    }

    /// Full match over an already decoded token sequence.
    pub fn matches_protocols<S: AsRef<str>>(&self, protos: &[S]) -> bool {
        self.partial_match(protos).is_complete()
    }

    /// Full match over any address the decoding collaborator understands.
    ///
    /// Decoding failures are returned unchanged.
    ///
    /// ```
    /// use mafmt::named::TCP;
    ///
    /// assert_eq!(TCP.matches(&["ip4", "tcp"]), Ok(true));
    /// assert_eq!(TCP.matches(&vec!["ip4", "udp"]), Ok(false));
    /// ```
    pub fn matches<A: ProtoNames + ?Sized>(&self, addr: &A) -> Result<bool, A::Error> {
        let protos = match addr.proto_names() {
            Ok(protos) => protos,
            Err(err) => {
                trace!(pattern = %self, "address_decode_failure");
                return Err(err);
            }
        };
        let matched = self.matches_protocols(protos.as_slice());
        trace!(pattern = %self, tokens = protos.len(), matched, "pattern_match");
        Ok(matched)
    }
}
