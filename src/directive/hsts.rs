use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "Strict-Transport-Security";

/// 180 days.
const DEFAULT_MAX_AGE: u64 = 180 * 24 * 60 * 60;

/// HTTP Strict Transport Security.
///
/// Default: `Strict-Transport-Security: max-age=15552000; includeSubDomains`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Hsts {
    /// Seconds the browser should only use HTTPS
    pub max_age: u64,
    /// Apply to every subdomain as well
    #[serde(alias = "includeSubdomains")]
    pub include_sub_domains: bool,
    /// Ask to be included in browser preload lists
    pub preload: bool,
}

impl Default for Hsts {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            include_sub_domains: true,
            preload: false,
        }
    }
}

impl Hsts {
    /// Renders the header value.
    pub fn header_value(&self) -> String {
        let mut value = format!("max-age={}", self.max_age);
        if self.include_sub_domains {
            value.push_str("; includeSubDomains");
        }
        if self.preload {
            value.push_str("; preload");
        }
        value
    }
}

impl Directive for Hsts {
    const NAME: &'static str = "hsts";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, &self.header_value())
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.hsts
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.hsts
    }
}
