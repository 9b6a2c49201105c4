//! Directive configuration.
//!
//! A [`Config`] holds one [`Setting`] per directive. It is built once, handed
//! to [`Shield::new`](crate::Shield::new), and never changes afterwards.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::directive::{
    self, ContentSecurityPolicy, CrossDomain, Directive, DnsPrefetchControl, DontSniffMimetype,
    ExpectCt, FeaturePolicy, Frameguard, HidePoweredBy, Hsts, IeNoOpen, ReferrerPolicy,
    XssProtection,
};
use crate::Error;

/// Configuration entry for one directive.
///
/// | Variant      | Serialized as        | Effect                                  |
/// |--------------|----------------------|-----------------------------------------|
/// | `Default`    | key absent           | directive runs with its default options |
/// | `Disabled`   | `null`               | directive does not run at all           |
/// | `Enabled(T)` | options object       | directive runs with `T`                 |
///
/// `Default` and `Enabled(T::default())` behave identically for every
/// directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    /// No entry: use the directive's declared defaults.
    Default,
    /// Explicit "off" sentinel.
    Disabled,
    /// Explicit options.
    Enabled(T),
}

impl<T> Setting<T> {
    /// Returns true if this entry suppresses its directive.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Setting::Disabled)
    }

    /// Returns the explicit options, if any.
    pub fn as_enabled(&self) -> Option<&T> {
        match self {
            Setting::Enabled(options) => Some(options),
            _ => None,
        }
    }

    /// Returns which of the three states this entry is in.
    pub fn kind(&self) -> SettingKind {
        match self {
            Setting::Default => SettingKind::Default,
            Setting::Disabled => SettingKind::Disabled,
            Setting::Enabled(_) => SettingKind::Enabled,
        }
    }
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Setting::Default
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Setting<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Absent keys never reach here; `#[serde(default)]` on Config covers them.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(options) => Setting::Enabled(options),
            None => Setting::Disabled,
        })
    }
}

/// The state of a [`Setting`] without its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Entry absent
    Default,
    /// Disabled sentinel
    Disabled,
    /// Explicit options
    Enabled,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Default => write!(f, "default"),
            SettingKind::Disabled => write!(f, "disabled"),
            SettingKind::Enabled => write!(f, "enabled"),
        }
    }
}

/// Per-directive configuration.
///
/// `Config::default()` runs every directive with its declared defaults.
/// Deserializing uses the camelCase keys `crossDomain`, `csp`,
/// `dnsPrefetchControl`, `dontSniffMimetype`, `expectCt`, `featurePolicy`,
/// `frameguard`, `hidePoweredBy`, `hsts`, `ieNoOpen`, `referrerPolicy` and
/// `xssProtection`; unknown keys are rejected.
///
/// # Examples
///
/// ```
/// use header_shield::{Config, DnsPrefetchControl, HidePoweredBy, Hsts, SettingKind};
///
/// let config = Config::default()
///     .enable(DnsPrefetchControl { allow: true })
///     .enable(HidePoweredBy::set_to("PHP 4.2.0"))
///     .disable::<Hsts>();
///
/// assert_eq!(config.setting_of("hsts"), Some(SettingKind::Disabled));
/// assert_eq!(config.setting_of("frameguard"), Some(SettingKind::Default));
/// assert_eq!(config.setting_of("no-such-directive"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// `X-Permitted-Cross-Domain-Policies`
    pub cross_domain: Setting<CrossDomain>,
    /// `Content-Security-Policy`
    pub csp: Setting<ContentSecurityPolicy>,
    /// `X-DNS-Prefetch-Control`
    pub dns_prefetch_control: Setting<DnsPrefetchControl>,
    /// `X-Content-Type-Options`
    pub dont_sniff_mimetype: Setting<DontSniffMimetype>,
    /// `Expect-CT`
    pub expect_ct: Setting<ExpectCt>,
    /// `Feature-Policy`
    pub feature_policy: Setting<FeaturePolicy>,
    /// `X-Frame-Options`
    pub frameguard: Setting<Frameguard>,
    /// `X-Powered-By`
    pub hide_powered_by: Setting<HidePoweredBy>,
    /// `Strict-Transport-Security`
    pub hsts: Setting<Hsts>,
    /// `X-Download-Options`
    pub ie_no_open: Setting<IeNoOpen>,
    /// `Referrer-Policy`
    pub referrer_policy: Setting<ReferrerPolicy>,
    /// `X-XSS-Protection`
    pub xss_protection: Setting<XssProtection>,
}

impl Config {
    /// Runs directive `D` with the given options.
    ///
    /// Returns the updated config to allow method chaining.
    pub fn enable<D: Directive>(mut self, options: D) -> Self {
        *D::setting_mut(&mut self) = Setting::Enabled(options);
        self
    }

    /// Suppresses directive `D`.
    pub fn disable<D: Directive>(mut self) -> Self {
        *D::setting_mut(&mut self) = Setting::Disabled;
        self
    }

    /// Resets directive `D` to its declared defaults.
    pub fn reset<D: Directive>(mut self) -> Self {
        *D::setting_mut(&mut self) = Setting::Default;
        self
    }

    /// Checks every explicitly enabled directive's options.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvalidOption`], in registry order.
    ///
    /// # Examples
    ///
    /// ```
    /// use header_shield::{Config, Error, ReferrerPolicy};
    ///
    /// let config = Config::default().enable(ReferrerPolicy { policy: Vec::new() });
    /// assert!(matches!(config.validate(), Err(Error::InvalidOption { .. })));
    /// assert!(Config::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        directive::registry()
            .iter()
            .try_for_each(|entry| (entry.check)(self))
    }

    /// Looks up a directive by registry name and reports its state.
    ///
    /// Returns `None` for names that are not in the registry.
    pub fn setting_of(&self, name: &str) -> Option<SettingKind> {
        directive::registry()
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| (entry.kind)(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_leaves_everything_default() {
        let config = Config::default();
        for name in directive::names() {
            assert_eq!(config.setting_of(name), Some(SettingKind::Default));
        }
    }

    #[test]
    fn enable_and_disable_chain() {
        let config = Config::default()
            .enable(Hsts {
                preload: true,
                ..Hsts::default()
            })
            .disable::<Frameguard>();

        assert_eq!(config.setting_of("hsts"), Some(SettingKind::Enabled));
        assert!(config.hsts.as_enabled().unwrap().preload);
        assert!(config.frameguard.is_disabled());
    }

    #[test]
    fn last_call_wins() {
        let config = Config::default()
            .disable::<IeNoOpen>()
            .enable(IeNoOpen {})
            .reset::<IeNoOpen>();

        assert_eq!(config.ie_no_open, Setting::Default);
    }

    #[test]
    fn setting_kind_display() {
        assert_eq!(SettingKind::Default.to_string(), "default");
        assert_eq!(SettingKind::Disabled.to_string(), "disabled");
        assert_eq!(SettingKind::Enabled.to_string(), "enabled");
    }

    #[test]
    fn validate_reports_first_invalid_directive() {
        let config = Config::default()
            .enable(ReferrerPolicy { policy: Vec::new() })
            .enable(Frameguard {
                action: crate::FrameAction::AllowFrom,
                domain: None,
            });

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { directive: "frameguard", .. }));
    }

    #[test]
    fn validate_skips_disabled_entries() {
        let config = Config::default().disable::<ContentSecurityPolicy>();
        assert!(config.validate().is_ok());
    }
}
