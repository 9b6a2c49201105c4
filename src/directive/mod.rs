//! Header directives and their fixed-order registry.
//!
//! Each directive is an options type implementing [`Directive`]. Its `Default`
//! impl is the directive's declared default, and `apply` is the only place it
//! touches headers. The registry runs them in this order, every invocation:
//!
//! | # | Name                   | Header                              |
//! |---|------------------------|-------------------------------------|
//! | 1 | `crossdomain`          | `X-Permitted-Cross-Domain-Policies` |
//! | 2 | `csp`                  | `Content-Security-Policy`           |
//! | 3 | `dns-prefetch-control` | `X-DNS-Prefetch-Control`            |
//! | 4 | `dont-sniff-mimetype`  | `X-Content-Type-Options`            |
//! | 5 | `expect-ct`            | `Expect-CT`                         |
//! | 6 | `feature-policy`       | `Feature-Policy`                    |
//! | 7 | `frameguard`           | `X-Frame-Options`                   |
//! | 8 | `hide-powered-by`      | `X-Powered-By`                      |
//! | 9 | `hsts`                 | `Strict-Transport-Security`         |
//! | 10| `ienoopen`             | `X-Download-Options`                |
//! | 11| `referrer-policy`      | `Referrer-Policy`                   |
//! | 12| `x-xss-protection`     | `X-XSS-Protection`                  |

use std::fmt;

use crate::config::{Config, Setting, SettingKind};
use crate::{Error, RequestResponse};

mod crossdomain;
mod csp;
mod dns_prefetch_control;
mod dont_sniff_mimetype;
mod expect_ct;
mod feature_policy;
mod frameguard;
mod hide_powered_by;
mod hsts;
mod ienoopen;
mod referrer_policy;
mod xss_protection;

pub use crossdomain::{CrossDomain, PermittedPolicies};
pub use csp::ContentSecurityPolicy;
pub use dns_prefetch_control::DnsPrefetchControl;
pub use dont_sniff_mimetype::DontSniffMimetype;
pub use expect_ct::ExpectCt;
pub use feature_policy::FeaturePolicy;
pub use frameguard::{FrameAction, Frameguard};
pub use hide_powered_by::HidePoweredBy;
pub use hsts::Hsts;
pub use ienoopen::IeNoOpen;
pub use referrer_policy::{Referrer, ReferrerPolicy};
pub use xss_protection::XssProtection;

/// One unit of header-mutation policy.
///
/// `Self` is the directive's options; `Self::default()` is the behavior used
/// when the configuration has no entry for it.
pub trait Directive: Default + Clone + fmt::Debug + Send + Sync + 'static {
    /// Registry name, e.g. `"hide-powered-by"`.
    const NAME: &'static str;

    /// Applies the directive to the response side of `pair`.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures, and returns [`Error::InvalidOption`] when
    /// the options contradict each other.
    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error>;

    /// Checks the options without touching any headers.
    ///
    /// Called once per enabled directive from
    /// [`Shield::initialize`](crate::Shield::initialize), so options that can
    /// never render are rejected before the first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for the same cases `apply` would.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// This directive's entry in `config`.
    fn setting(config: &Config) -> &Setting<Self>;

    /// This directive's mutable entry in `config`.
    fn setting_mut(config: &mut Config) -> &mut Setting<Self>;
}

type Step = fn(&Config, &mut dyn RequestResponse) -> Result<bool, Error>;

/// A registry slot: the directive name plus its type-erased runner.
pub(crate) struct Entry {
    pub(crate) name: &'static str,
    pub(crate) run: Step,
    pub(crate) kind: fn(&Config) -> SettingKind,
    pub(crate) check: fn(&Config) -> Result<(), Error>,
}

impl Entry {
    const fn of<D: Directive>() -> Self {
        Self {
            name: D::NAME,
            run: run::<D>,
            kind: kind_of::<D>,
            check: check::<D>,
        }
    }
}

static REGISTRY: [Entry; 12] = [
    Entry::of::<CrossDomain>(),
    Entry::of::<ContentSecurityPolicy>(),
    Entry::of::<DnsPrefetchControl>(),
    Entry::of::<DontSniffMimetype>(),
    Entry::of::<ExpectCt>(),
    Entry::of::<FeaturePolicy>(),
    Entry::of::<Frameguard>(),
    Entry::of::<HidePoweredBy>(),
    Entry::of::<Hsts>(),
    Entry::of::<IeNoOpen>(),
    Entry::of::<ReferrerPolicy>(),
    Entry::of::<XssProtection>(),
];

pub(crate) fn registry() -> &'static [Entry] {
    &REGISTRY
}

/// Returns the directive names in application order.
///
/// # Examples
///
/// ```
/// let names: Vec<_> = header_shield::directive::names().collect();
/// assert_eq!(names.first(), Some(&"crossdomain"));
/// assert_eq!(names.last(), Some(&"x-xss-protection"));
/// ```
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.name)
}

/// Runs `D` according to its setting. Returns whether it ran.
fn run<D: Directive>(config: &Config, pair: &mut dyn RequestResponse) -> Result<bool, Error> {
    match D::setting(config) {
        Setting::Disabled => Ok(false),
        Setting::Default => D::default().apply(pair).map(|()| true),
        Setting::Enabled(options) => options.apply(pair).map(|()| true),
    }
}

fn kind_of<D: Directive>(config: &Config) -> SettingKind {
    D::setting(config).kind()
}

/// Validates explicit options. Declared defaults always render.
fn check<D: Directive>(config: &Config) -> Result<(), Error> {
    match D::setting(config) {
        Setting::Enabled(options) => options.validate(),
        Setting::Default | Setting::Disabled => Ok(()),
    }
}

/// Converts `camelCase` keys to the dashed form browsers expect.
///
/// Already-dashed keys pass through unchanged. A run of capitals is one word
/// (`reportURI` is `report-uri`). Returns `None` unless the result is a
/// plain lowercase name (`[a-z]` followed by letters and single dashes).
pub(crate) fn dashed(key: &str) -> Option<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_uppercase() {
            out.push(ch);
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1);
        let boundary = match prev {
            Some(p) if p.is_ascii_lowercase() => true,
            Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
            _ => false,
        };
        if boundary {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }

    let valid = out.starts_with(|c: char| c.is_ascii_lowercase())
        && !out.ends_with('-')
        && !out.contains("--")
        && out.chars().all(|c| c.is_ascii_lowercase() || c == '-');
    valid.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn registry_order_is_fixed() {
        let names: Vec<_> = names().collect();
        assert_eq!(
            names,
            vec![
                "crossdomain",
                "csp",
                "dns-prefetch-control",
                "dont-sniff-mimetype",
                "expect-ct",
                "feature-policy",
                "frameguard",
                "hide-powered-by",
                "hsts",
                "ienoopen",
                "referrer-policy",
                "x-xss-protection",
            ]
        );
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<_> = names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REGISTRY.len());
    }

    #[test]
    fn disabled_step_does_not_touch_pair() {
        let config = Config::default().disable::<DontSniffMimetype>();
        let mut pair = MemoryPair::default();

        let ran = run::<DontSniffMimetype>(&config, &mut pair).unwrap();
        assert!(!ran);
        assert!(pair.response.is_empty());
    }

    #[test]
    fn default_step_uses_declared_defaults() {
        let config = Config::default();
        let mut pair = MemoryPair::default();

        let ran = run::<DnsPrefetchControl>(&config, &mut pair).unwrap();
        assert!(ran);
        assert_eq!(pair.response["X-DNS-Prefetch-Control"], "off");
    }

    #[test]
    fn dashed_converts_camel_case() {
        assert_eq!(dashed("defaultSrc").as_deref(), Some("default-src"));
        assert_eq!(
            dashed("upgradeInsecureRequests").as_deref(),
            Some("upgrade-insecure-requests")
        );
        assert_eq!(dashed("script-src").as_deref(), Some("script-src"));
        assert_eq!(dashed("fullscreen").as_deref(), Some("fullscreen"));
    }

    #[test]
    fn dashed_handles_leading_capitals_and_acronyms() {
        assert_eq!(dashed("DefaultSrc").as_deref(), Some("default-src"));
        assert_eq!(dashed("reportURI").as_deref(), Some("report-uri"));
        assert_eq!(dashed("XMLHttpRequest").as_deref(), Some("xml-http-request"));
    }

    #[test]
    fn dashed_rejects_names_browsers_would_ignore() {
        assert_eq!(dashed(""), None);
        assert_eq!(dashed("-default-src"), None);
        assert_eq!(dashed("default--src"), None);
        assert_eq!(dashed("img-src-"), None);
        assert_eq!(dashed("font src"), None);
        assert_eq!(dashed("sha256"), None);
    }

    #[test]
    fn check_ignores_default_and_disabled_entries() {
        let config = Config::default().disable::<ReferrerPolicy>();
        for entry in registry() {
            assert!((entry.check)(&config).is_ok(), "{} should pass", entry.name);
        }
    }

    #[test]
    fn check_rejects_enabled_options_that_cannot_render() {
        let config = Config::default().enable(ReferrerPolicy { policy: Vec::new() });
        assert!(check::<ReferrerPolicy>(&config).is_err());
        assert!(check::<Frameguard>(&config).is_ok());
    }
}
