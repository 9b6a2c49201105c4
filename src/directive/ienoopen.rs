use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-Download-Options";

/// Keeps old Internet Explorer from opening downloads in the site's context.
///
/// Takes no options; always sets `X-Download-Options: noopen`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IeNoOpen {}

impl Directive for IeNoOpen {
    const NAME: &'static str = "ienoopen";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, "noopen")
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.ie_no_open
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.ie_no_open
    }
}
