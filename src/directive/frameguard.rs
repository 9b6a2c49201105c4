use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-Frame-Options";

/// Framing rule for `X-Frame-Options`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FrameAction {
    /// Never render inside a frame
    #[serde(rename = "deny")]
    Deny,
    /// Only frames from the same origin
    #[default]
    #[serde(rename = "sameorigin", alias = "same-origin")]
    SameOrigin,
    /// Only frames from `Frameguard::domain`
    #[serde(rename = "allow-from")]
    AllowFrom,
}

/// Mitigates clickjacking through `X-Frame-Options`.
///
/// Default: `X-Frame-Options: SAMEORIGIN`.
///
/// # Examples
///
/// ```
/// use header_shield::{FrameAction, Frameguard};
///
/// let options = Frameguard::allow_from("https://example.com");
/// assert_eq!(options.action, FrameAction::AllowFrom);
/// assert_eq!(options.header_value().unwrap(), "ALLOW-FROM https://example.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Frameguard {
    /// Framing rule
    pub action: FrameAction,
    /// Origin allowed to frame the page; required by `AllowFrom`
    pub domain: Option<String>,
}

impl Frameguard {
    /// Options that forbid framing entirely.
    pub fn deny() -> Self {
        Self {
            action: FrameAction::Deny,
            domain: None,
        }
    }

    /// Options that allow framing from one origin.
    pub fn allow_from(domain: impl Into<String>) -> Self {
        Self {
            action: FrameAction::AllowFrom,
            domain: Some(domain.into()),
        }
    }

    /// Renders the header value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for `AllowFrom` without a domain.
    pub fn header_value(&self) -> Result<String, Error> {
        match self.action {
            FrameAction::Deny => Ok("DENY".to_string()),
            FrameAction::SameOrigin => Ok("SAMEORIGIN".to_string()),
            FrameAction::AllowFrom => match self.domain.as_deref() {
                Some(domain) if !domain.is_empty() => Ok(format!("ALLOW-FROM {}", domain)),
                _ => Err(Error::invalid_option(
                    Self::NAME,
                    "action allow-from requires a domain",
                )),
            },
        }
    }
}

impl Directive for Frameguard {
    const NAME: &'static str = "frameguard";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, &self.header_value()?)
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.frameguard
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.frameguard
    }
}
