//! Orchestrator lifecycle states.

use std::fmt;

use crate::framework::FrameworkKind;

/// Where a [`Shield`](crate::Shield) is in its lifecycle.
///
/// The only transition is `Unconfigured` → `Initialized`, made by a
/// successful [`Shield::initialize`](crate::Shield::initialize). There is no
/// way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Selector token not resolved yet, or resolution failed
    Unconfigured,
    /// Adapter resolved; invocations are accepted
    Initialized(FrameworkKind),
}

impl Lifecycle {
    /// Returns true once invocations are accepted.
    pub fn is_initialized(&self) -> bool {
        matches!(self, Lifecycle::Initialized(_))
    }

    /// The resolved adapter, if any.
    pub fn framework(&self) -> Option<FrameworkKind> {
        match self {
            Lifecycle::Unconfigured => None,
            Lifecycle::Initialized(kind) => Some(*kind),
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Unconfigured => write!(f, "unconfigured"),
            Lifecycle::Initialized(kind) => write!(f, "initialized({})", kind),
        }
    }
}
