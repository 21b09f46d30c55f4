use std::borrow::Cow;
use std::convert::Infallible;

/// Outcome of consuming a prefix of a protocol token sequence.
///
/// `NoMatch` and `Remainder(&[])` are deliberately distinct: the latter means
/// the pattern matched and consumed every token.
#[derive(Debug, PartialEq, Eq)]
pub enum PartialMatch<'a, S> {
    /// The pattern does not match a prefix of the input.
    NoMatch,
    /// The pattern matched a prefix; the slice holds the unconsumed tail.
    Remainder(&'a [S]),
}

// Manual impls: a derive would require `S: Clone`/`S: Copy`, but the variant
// only holds a shared slice.
impl<S> Clone for PartialMatch<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for PartialMatch<'_, S> {}

impl<'a, S> PartialMatch<'a, S> {
    /// `true` unless this is [`PartialMatch::NoMatch`].
    pub fn is_match(&self) -> bool {
        matches!(self, PartialMatch::Remainder(_))
    }

    /// `true` only for a match that left nothing behind.
    pub fn is_complete(&self) -> bool {
        matches!(self, PartialMatch::Remainder(rest) if rest.is_empty())
    }

    /// The unconsumed tail, or `None` for [`PartialMatch::NoMatch`].
    pub fn remainder(self) -> Option<&'a [S]> {
        match self {
            PartialMatch::NoMatch => None,
            PartialMatch::Remainder(rest) => Some(rest),
        }
    }
}

/// Decodes an address into its ordered protocol-name tokens.
///
/// This is the seam to whatever understands the address format. Patterns call
/// it from [`Pattern::matches`](crate::Pattern::matches) and hand any failure
/// back to the caller untouched.
pub trait ProtoNames {
    /// Failure raised for malformed input.
    type Error;

    /// Lowercase protocol names, outermost layer first (`["ip4", "tcp", "ws"]`).
    fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error>;
}

impl<S: AsRef<str>> ProtoNames for [S] {
    type Error = Infallible;

    fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
        Ok(self.iter().map(|name| Cow::Borrowed(name.as_ref())).collect())
    }
}

impl<S: AsRef<str>> ProtoNames for Vec<S> {
    type Error = Infallible;

    fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
        self.as_slice().proto_names()
    }
}

impl<S: AsRef<str>, const N: usize> ProtoNames for [S; N] {
    type Error = Infallible;

    fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
        self.as_slice().proto_names()
    }
}

impl<T: ProtoNames + ?Sized> ProtoNames for &T {
    type Error = T::Error;

    fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
        (**self).proto_names()
    }
}

#[cfg(feature = "multiaddr")]
mod multiaddr_impl {
    use super::*;
    use multiaddr::{Multiaddr, Protocol};

    // Peer ids and the webrtc transports carried their legacy names when
    // the built-in patterns were written; report them under those names.
    fn proto_name(proto: &Protocol<'_>) -> &'static str {
        match proto {
            Protocol::P2p(_) => "ipfs",
            Protocol::P2pWebRtcStar => "libp2p-webrtc-star",
            Protocol::P2pWebRtcDirect => "libp2p-webrtc-direct",
            other => other.tag(),
        }
    }

    fn names_of(addr: &Multiaddr) -> Vec<Cow<'static, str>> {
        addr.iter()
            .map(|proto| Cow::Borrowed(proto_name(&proto)))
            .collect()
    }

    impl ProtoNames for Multiaddr {
        type Error = Infallible;

        fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
            Ok(names_of(self))
        }
    }

    impl ProtoNames for str {
        type Error = multiaddr::Error;

        fn proto_names(&self) -> Result<Vec<Cow<'_, str>>, Self::Error> {
            let addr: Multiaddr = self.parse()?;
            Ok(names_of(&addr))
        }
    }
}
