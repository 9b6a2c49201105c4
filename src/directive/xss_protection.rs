use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-XSS-Protection";

/// Legacy reflected-XSS filter control.
///
/// Default: `X-XSS-Protection: 1; mode=block`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct XssProtection {
    /// Block the page instead of sanitizing it
    pub mode_block: bool,
    /// Where browsers send violation reports
    pub report_uri: Option<String>,
}

impl Default for XssProtection {
    fn default() -> Self {
        Self {
            mode_block: true,
            report_uri: None,
        }
    }
}

impl XssProtection {
    /// Renders the header value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if `report_uri` contains `;`, `,` or
    /// a control character.
    pub fn header_value(&self) -> Result<String, Error> {
        let mut value = String::from("1");
        if self.mode_block {
            value.push_str("; mode=block");
        }
        if let Some(uri) = &self.report_uri {
            if uri.chars().any(|c| c == ';' || c == ',' || c.is_control()) {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("report uri '{}' contains a separator", uri.escape_default()),
                ));
            }
            value.push_str("; report=");
            value.push_str(uri);
        }
        Ok(value)
    }
}

impl Directive for XssProtection {
    const NAME: &'static str = "x-xss-protection";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, &self.header_value()?)
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.xss_protection
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.xss_protection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn default_blocks() {
        assert_eq!(XssProtection::default().header_value().unwrap(), "1; mode=block");
    }

    #[test]
    fn filter_only() {
        let options = XssProtection {
            mode_block: false,
            report_uri: None,
        };
        assert_eq!(options.header_value().unwrap(), "1");
    }

    #[test]
    fn report_uri_is_appended() {
        let options = XssProtection {
            report_uri: Some("/xss-report".to_string()),
            ..XssProtection::default()
        };
        assert_eq!(options.header_value().unwrap(), "1; mode=block; report=/xss-report");
    }

    #[test]
    fn report_uri_with_separator_is_rejected() {
        let mut pair = MemoryPair::default();
        let options = XssProtection {
            report_uri: Some("/xss; mode=off".to_string()),
            ..XssProtection::default()
        };

        let err = options.apply(&mut pair).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { directive: "x-xss-protection", .. }));
        assert!(options.validate().is_err());
        assert!(pair.response.is_empty());
    }
}
