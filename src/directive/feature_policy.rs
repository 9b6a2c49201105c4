use std::collections::BTreeMap;

use serde::Deserialize;

use super::{dashed, Directive};
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "Feature-Policy";

/// Restricts browser features (camera, geolocation, ...) per origin.
///
/// Inactive by default: no header is written until at least one feature is
/// configured. Feature names may be camelCase or dashed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturePolicy {
    /// Feature name to allow list
    pub features: BTreeMap<String, Vec<String>>,
}

impl FeaturePolicy {
    /// Adds or replaces one feature.
    pub fn with_feature<I, S>(mut self, name: impl Into<String>, allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features
            .insert(name.into(), allow.into_iter().map(Into::into).collect());
        self
    }

    /// Renders the header value, or `None` when no feature is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for a malformed feature name or an
    /// empty allow list.
    pub fn header_value(&self) -> Result<Option<String>, Error> {
        if self.features.is_empty() {
            return Ok(None);
        }
        let mut parts = Vec::with_capacity(self.features.len());
        for (name, allow) in &self.features {
            if allow.is_empty() {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("feature '{}' has an empty allow list", name),
                ));
            }
            let feature = dashed(name).ok_or_else(|| {
                Error::invalid_option(Self::NAME, format!("'{}' is not a feature name", name))
            })?;
            parts.push(format!("{} {}", feature, allow.join(" ")));
        }
        Ok(Some(parts.join("; ")))
    }
}

impl Directive for FeaturePolicy {
    const NAME: &'static str = "feature-policy";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        match self.header_value()? {
            Some(value) => pair.set_response_header(HEADER, &value),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.feature_policy
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.feature_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn inactive_by_default() {
        let mut pair = MemoryPair::default();
        FeaturePolicy::default().apply(&mut pair).unwrap();
        assert!(pair.response.is_empty());
    }

    #[test]
    fn renders_features() {
        let options = FeaturePolicy::default()
            .with_feature("vibrate", ["'none'"])
            .with_feature("syncXhr", ["'self'", "https://example.com"]);
        assert_eq!(
            options.header_value().unwrap().as_deref(),
            Some("sync-xhr 'self' https://example.com; vibrate 'none'")
        );
    }

    #[test]
    fn empty_allow_list_is_rejected() {
        let options = FeaturePolicy::default().with_feature("camera", [] as [&str; 0]);
        assert!(options.header_value().is_err());
    }

    #[test]
    fn malformed_feature_name_is_rejected() {
        let options = FeaturePolicy::default().with_feature("-camera", ["'none'"]);
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidOption { directive: "feature-policy", .. })
        ));
    }
}
