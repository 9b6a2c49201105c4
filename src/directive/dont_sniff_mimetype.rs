use serde::Deserialize;

use super::Directive;
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "X-Content-Type-Options";

/// Stops browsers from MIME-sniffing a response away from its declared type.
///
/// Takes no options; always sets `X-Content-Type-Options: nosniff`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DontSniffMimetype {}

impl Directive for DontSniffMimetype {
    const NAME: &'static str = "dont-sniff-mimetype";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        pair.set_response_header(HEADER, "nosniff")
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.dont_sniff_mimetype
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.dont_sniff_mimetype
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn sets_nosniff() {
        let mut pair = MemoryPair::default();
        DontSniffMimetype {}.apply(&mut pair).unwrap();
        assert_eq!(pair.response[HEADER], "nosniff");
        assert_eq!(pair.response.len(), 1);
    }
}
