use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "Expect-CT";

/// Opts into Certificate Transparency enforcement or reporting.
///
/// Default: `Expect-CT: max-age=0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectCt {
    /// Seconds the browser should remember the policy
    pub max_age: u64,
    /// Refuse connections that violate the policy instead of only reporting
    pub enforce: bool,
    /// Where browsers send violation reports
    pub report_uri: Option<String>,
}

impl ExpectCt {
    /// Renders the header value, e.g. `max-age=86400, enforce`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if `report_uri` contains a quote, a
    /// comma or a control character.
    pub fn header_value(&self) -> Result<String, Error> {
        let mut value = format!("max-age={}", self.max_age);
        if self.enforce {
            value.push_str(", enforce");
        }
        if let Some(uri) = &self.report_uri {
            if uri.chars().any(|c| c == '"' || c == ',' || c.is_control()) {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("report-uri '{}' would break the quoted value", uri.escape_default()),
                ));
            }
            value.push_str(&format!(", report-uri=\"{}\"", uri));
        }
        Ok(value)
    }
}

impl Directive for ExpectCt {
    const NAME: &'static str = "expect-ct";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, &self.header_value()?)
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.expect_ct
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.expect_ct
    }
}
