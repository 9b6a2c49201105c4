use std::fmt;

use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-Permitted-Cross-Domain-Policies";

/// Which cross-domain policy files Adobe clients may load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermittedPolicies {
    /// No policy files anywhere
    #[default]
    None,
    /// Only the master policy file
    MasterOnly,
    /// Only files served as `text/x-cross-domain-policy`
    ByContentType,
    /// Any policy file
    All,
}

impl PermittedPolicies {
    /// The header value for this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            PermittedPolicies::None => "none",
            PermittedPolicies::MasterOnly => "master-only",
            PermittedPolicies::ByContentType => "by-content-type",
            PermittedPolicies::All => "all",
        }
    }
}

impl fmt::Display for PermittedPolicies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts Adobe Flash/Acrobat cross-domain policy files.
///
/// Default: `X-Permitted-Cross-Domain-Policies: none`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CrossDomain {
    /// Policy to advertise
    pub permitted_policies: PermittedPolicies,
}

impl Directive for CrossDomain {
    const NAME: &'static str = "crossdomain";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, self.permitted_policies.as_str())
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.cross_domain
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.cross_domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn defaults_to_none() {
        let mut pair = MemoryPair::default();
        CrossDomain::default().apply(&mut pair).unwrap();
        assert_eq!(pair.response[HEADER], "none");
    }

    #[test]
    fn renders_each_policy() {
        for (policy, expected) in [
            (PermittedPolicies::MasterOnly, "master-only"),
            (PermittedPolicies::ByContentType, "by-content-type"),
            (PermittedPolicies::All, "all"),
        ] {
            let mut pair = MemoryPair::default();
            CrossDomain {
                permitted_policies: policy,
            }
            .apply(&mut pair)
            .unwrap();
            assert_eq!(pair.response[HEADER], expected);
        }
    }
}
