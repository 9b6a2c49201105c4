use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-Powered-By";

/// Hides or disguises the `X-Powered-By` header.
///
/// Default: remove the header. With a non-empty `set_to`, the header is set
/// to that value instead.
///
/// # Examples
///
/// ```
/// use header_shield::HidePoweredBy;
///
/// assert_eq!(HidePoweredBy::default().set_to, None);
/// assert_eq!(HidePoweredBy::set_to("PHP 4.2.0").set_to.as_deref(), Some("PHP 4.2.0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HidePoweredBy {
    /// Replacement value; `None` or empty removes the header
    pub set_to: Option<String>,
}

impl HidePoweredBy {
    /// Options that replace the header with `value`.
    pub fn set_to(value: impl Into<String>) -> Self {
        Self {
            set_to: Some(value.into()),
        }
    }
}

impl Directive for HidePoweredBy {
    const NAME: &'static str = "hide-powered-by";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        match self.set_to.as_deref() {
            Some(value) if !value.is_empty() => pair.set_response_header(HEADER, value),
            _ => pair.remove_response_header(HEADER),
        }
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.hide_powered_by
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.hide_powered_by
    }
}
