//! Framework adapters and the selector registry.
//!
//! This is the only part of the crate that knows about native request and
//! response types. It provides:
//! - [`FrameworkKind`]: the closed set of adapters, selectable by name
//! - [`Adapter`]: how one framework wraps its native pair into a
//!   [`RequestResponse`](crate::RequestResponse)
//! - [`NativeRequest`]: ties a native request type to its framework so the
//!   orchestrator can pick the adapter from the argument types
//!
//! # Design Principles
//!
//! 1. **Static registry**: selector tokens map to a fixed set of adapters known
//!    at compile time. An unknown token is an error, never a lookup at runtime.
//!
//! 2. **Narrow native views**: adapters are written against small traits that
//!    expose only header storage ([`HeaderSource`], [`HeaderSink`],
//!    [`HeaderTable`]), never against whole framework objects.
//!
//! 3. **Borrowed natives**: an adapted pair holds references to the native
//!    objects for one invocation and owns nothing.
//!
//! # Integration Model
//!
//! Host code that wants to use its own native types:
//! 1. Implements the view trait of the matching adapter for its request and
//!    response types
//! 2. Implements [`NativeRequest`] for its request type
//! 3. Passes both to [`Shield::invoke`](crate::Shield::invoke)

use std::fmt;
use std::str::FromStr;

use crate::{Error, RequestResponse};

mod native_http;
mod plain;

pub use native_http::{HeaderSink, HeaderSource, Http, HttpPair};
pub use plain::{HeaderTable, Plain, PlainPair};

/// The closed set of framework adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkKind {
    /// Native types from the `http` crate (axum, hyper, tower and friends).
    /// Header names are case-insensitive.
    Http,
    /// Headers stored in a `HashMap<String, String>`. Header names are
    /// matched exactly.
    Plain,
}

/// Selector tokens, in lookup order.
const SELECTORS: &[(&str, FrameworkKind)] = &[
    ("http", FrameworkKind::Http),
    ("axum", FrameworkKind::Http),
    ("hyper", FrameworkKind::Http),
    ("tower", FrameworkKind::Http),
    ("plain", FrameworkKind::Plain),
];

impl FrameworkKind {
    /// Resolves a framework-selector token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFramework`] if no adapter answers to `token`.
    ///
    /// # Examples
    ///
    /// ```
    /// use header_shield::{Error, FrameworkKind};
    ///
    /// assert_eq!(FrameworkKind::resolve("axum"), Ok(FrameworkKind::Http));
    /// assert!(matches!(
    ///     FrameworkKind::resolve("oak"),
    ///     Err(Error::UnknownFramework { .. })
    /// ));
    /// ```
    pub fn resolve(token: &str) -> Result<Self, Error> {
        SELECTORS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| Error::UnknownFramework {
                token: token.to_string(),
            })
    }

    /// Returns every accepted selector token.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        SELECTORS.iter().map(|(name, _)| *name)
    }

    /// Returns the canonical token for this adapter.
    pub fn name(self) -> &'static str {
        match self {
            FrameworkKind::Http => "http",
            FrameworkKind::Plain => "plain",
        }
    }
}

impl fmt::Display for FrameworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameworkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Marker implemented by each adapter family.
pub trait Framework {
    /// Registry entry this adapter answers to.
    const KIND: FrameworkKind;
}

/// Wraps a native request/response pair into a [`RequestResponse`].
///
/// Implemented once per framework, generic over that framework's native view
/// traits.
pub trait Adapter<Req, Res>: Framework {
    /// The adapted pair, borrowing both natives for `'a`.
    type Pair<'a>: RequestResponse
    where
        Req: 'a,
        Res: 'a;

    /// Builds a fresh adapted pair over the two native objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedNativeObject`] if either object has no header
    /// storage.
    fn adapt<'a>(request: &'a Req, response: &'a mut Res) -> Result<Self::Pair<'a>, Error>;
}

/// Associates a native request type with the framework that adapts it.
///
/// The orchestrator uses this to pick the adapter from the argument types, and
/// checks the pick against the framework resolved at initialization.
pub trait NativeRequest {
    /// The framework family this request type belongs to.
    type Framework: Framework;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_resolves() {
        for token in FrameworkKind::tokens() {
            assert!(FrameworkKind::resolve(token).is_ok(), "{} should resolve", token);
        }
    }

    #[test]
    fn canonical_names_round_trip() {
        for kind in [FrameworkKind::Http, FrameworkKind::Plain] {
            assert_eq!(FrameworkKind::resolve(kind.name()), Ok(kind));
            assert_eq!(kind.name().parse::<FrameworkKind>(), Ok(kind));
        }
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert_eq!(
            FrameworkKind::resolve("HTTP"),
            Err(Error::UnknownFramework {
                token: "HTTP".to_string()
            })
        );
    }

    #[test]
    fn unknown_token_carries_the_token() {
        let err = FrameworkKind::resolve("").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownFramework {
                token: String::new()
            }
        );
    }
}
