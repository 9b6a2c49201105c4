use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-DNS-Prefetch-Control";

/// Controls whether browsers prefetch DNS for links on the page.
///
/// Default: `X-DNS-Prefetch-Control: off`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DnsPrefetchControl {
    /// Allow prefetching (`on`) instead of blocking it (`off`)
    pub allow: bool,
}

impl DnsPrefetchControl {
    /// The header value these options produce.
    pub fn header_value(&self) -> &'static str {
        if self.allow {
            "on"
        } else {
            "off"
        }
    }
}

impl Directive for DnsPrefetchControl {
    const NAME: &'static str = "dns-prefetch-control";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, self.header_value())
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.dns_prefetch_control
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.dns_prefetch_control
    }
}
