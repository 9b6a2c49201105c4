use std::fmt;

use crate::framework::FrameworkKind;

/// Errors that can occur while resolving an adapter or applying directives.
///
/// None of these are retried internally: each one describes a structural
/// mismatch that a second attempt would hit again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The framework-selector token does not name a known adapter.
    UnknownFramework {
        /// The token that failed to resolve
        token: String,
    },
    /// `invoke`/`apply` was called before `initialize` completed.
    NotInitialized,
    /// The native types passed to `invoke` belong to a different adapter than
    /// the one the orchestrator was initialized for.
    FrameworkMismatch {
        /// Adapter resolved by `initialize`
        expected: FrameworkKind,
        /// Adapter the native types belong to
        found: FrameworkKind,
    },
    /// A native request or response has no header storage to adapt.
    MalformedNativeObject {
        /// Adapter that rejected the object
        framework: FrameworkKind,
        /// Which side was missing its headers
        detail: &'static str,
    },
    /// The native framework rejected a header name or value.
    InvalidHeader {
        /// Header name as given by the directive
        name: String,
        /// Why the native framework refused it
        reason: &'static str,
    },
    /// A directive's options contradict each other.
    InvalidOption {
        /// Registry name of the directive
        directive: &'static str,
        /// Human-readable explanation
        reason: String,
    },
}

impl Error {
    pub(crate) fn malformed(framework: FrameworkKind, detail: &'static str) -> Self {
        Error::MalformedNativeObject { framework, detail }
    }

    pub(crate) fn invalid_header(name: &str, reason: &'static str) -> Self {
        Error::InvalidHeader {
            name: name.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_option(directive: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            directive,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownFramework { token } => write!(f, "unknown framework '{}'", token),
            Error::NotInitialized => write!(f, "shield used before initialize()"),
            Error::FrameworkMismatch { expected, found } => write!(
                f,
                "initialized for '{}' but invoked with '{}' native objects",
                expected, found
            ),
            Error::MalformedNativeObject { framework, detail } => {
                write!(f, "malformed {} native object: {}", framework, detail)
            }
            Error::InvalidHeader { name, reason } => {
                write!(f, "invalid header '{}': {}", name, reason)
            }
            Error::InvalidOption { directive, reason } => {
                write!(f, "invalid {} options: {}", directive, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
