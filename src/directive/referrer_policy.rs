use std::fmt;

use serde::{Deserialize, Deserializer};

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "Referrer-Policy";

/// One `Referrer-Policy` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Referrer {
    /// `no-referrer`
    NoReferrer,
    /// `no-referrer-when-downgrade`
    NoReferrerWhenDowngrade,
    /// `same-origin`
    SameOrigin,
    /// `origin`
    Origin,
    /// `strict-origin`
    StrictOrigin,
    /// `origin-when-cross-origin`
    OriginWhenCrossOrigin,
    /// `strict-origin-when-cross-origin`
    StrictOriginWhenCrossOrigin,
    /// `unsafe-url`
    UnsafeUrl,
    /// The empty token, deferring to other policy sources
    #[serde(rename = "")]
    Empty,
}

impl Referrer {
    /// The token as it appears in the header.
    pub fn as_str(self) -> &'static str {
        match self {
            Referrer::NoReferrer => "no-referrer",
            Referrer::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            Referrer::SameOrigin => "same-origin",
            Referrer::Origin => "origin",
            Referrer::StrictOrigin => "strict-origin",
            Referrer::OriginWhenCrossOrigin => "origin-when-cross-origin",
            Referrer::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            Referrer::UnsafeUrl => "unsafe-url",
            Referrer::Empty => "",
        }
    }
}

impl fmt::Display for Referrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls the `Referer` header browsers send on navigation.
///
/// Default: `Referrer-Policy: no-referrer`. Several tokens are sent as a
/// comma-separated fallback list.
///
/// # Examples
///
/// ```
/// use header_shield::{Referrer, ReferrerPolicy};
///
/// let options = ReferrerPolicy::new([Referrer::NoReferrer, Referrer::StrictOriginWhenCrossOrigin]);
/// assert_eq!(
///     options.header_value().unwrap(),
///     "no-referrer,strict-origin-when-cross-origin"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReferrerPolicy {
    /// Tokens in preference order; accepts a single string when deserialized
    #[serde(deserialize_with = "one_or_many")]
    pub policy: Vec<Referrer>,
}

impl Default for ReferrerPolicy {
    fn default() -> Self {
        Self {
            policy: vec![Referrer::NoReferrer],
        }
    }
}

impl ReferrerPolicy {
    /// Options with the given tokens.
    pub fn new(policy: impl IntoIterator<Item = Referrer>) -> Self {
        Self {
            policy: policy.into_iter().collect(),
        }
    }

    /// Renders the header value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for an empty or repeating token list.
    pub fn header_value(&self) -> Result<String, Error> {
        if self.policy.is_empty() {
            return Err(Error::invalid_option(Self::NAME, "policy list is empty"));
        }
        for (i, token) in self.policy.iter().enumerate() {
            if self.policy[..i].contains(token) {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("policy '{}' listed more than once", token),
                ));
            }
        }
        Ok(self
            .policy
            .iter()
            .map(|token| token.as_str())
            .collect::<Vec<_>>()
            .join(","))
    }
}

impl Directive for ReferrerPolicy {
    const NAME: &'static str = "referrer-policy";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, &self.header_value()?)
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.referrer_policy
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.referrer_policy
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Referrer),
    Many(Vec<Referrer>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Referrer>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(token) => vec![token],
        OneOrMany::Many(tokens) => tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn defaults_to_no_referrer() {
        let mut pair = MemoryPair::default();
        ReferrerPolicy::default().apply(&mut pair).unwrap();
        assert_eq!(pair.response[HEADER], "no-referrer");
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = ReferrerPolicy { policy: Vec::new() }.header_value().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn duplicates_are_rejected() {
        let options = ReferrerPolicy::new([Referrer::Origin, Referrer::Origin]);
        assert!(options.header_value().is_err());
    }

    #[test]
    fn empty_token_renders_empty_value() {
        let options = ReferrerPolicy::new([Referrer::Empty]);
        assert_eq!(options.header_value().unwrap(), "");
    }
}
