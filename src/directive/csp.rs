use std::collections::BTreeMap;

use serde::Deserialize;

use super::{dashed, Directive};
use crate::config::{Config, Setting};
use crate::{Error, RequestResponse};

const HEADER: &str = "Content-Security-Policy";
const REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";

/// Source list used when no `directives` are configured.
const DEFAULT_DIRECTIVES: &[(&str, &[&str])] = &[
    ("default-src", &["'self'"]),
    ("base-uri", &["'self'"]),
    ("block-all-mixed-content", &[]),
    ("font-src", &["'self'", "https:", "data:"]),
    ("frame-ancestors", &["'self'"]),
    ("img-src", &["'self'", "data:"]),
    ("object-src", &["'none'"]),
    ("script-src", &["'self'"]),
    ("script-src-attr", &["'none'"]),
    ("style-src", &["'self'", "https:", "'unsafe-inline'"]),
    ("upgrade-insecure-requests", &[]),
];

/// Content Security Policy.
///
/// Default: `Content-Security-Policy` with a same-origin source list (see
/// [`ContentSecurityPolicy::header_value`]). Directive names may be camelCase
/// (`defaultSrc`) or dashed (`default-src`); an empty source list renders the
/// bare directive name. An explicitly empty `directives` map sets nothing.
///
/// # Examples
///
/// ```
/// use header_shield::ContentSecurityPolicy;
///
/// let csp = ContentSecurityPolicy::empty()
///     .with_directive("defaultSrc", ["'self'"])
///     .with_directive("upgradeInsecureRequests", [] as [&str; 0]);
/// assert_eq!(
///     csp.header_value().unwrap().as_deref(),
///     Some("default-src 'self'; upgrade-insecure-requests")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentSecurityPolicy {
    /// Directive name to source list; `None` uses the default list
    pub directives: Option<BTreeMap<String, Vec<String>>>,
    /// Send `Content-Security-Policy-Report-Only` instead
    pub report_only: bool,
}

impl ContentSecurityPolicy {
    /// Options with no directives at all.
    pub fn empty() -> Self {
        Self {
            directives: Some(BTreeMap::new()),
            report_only: false,
        }
    }

    /// Adds or replaces one directive.
    pub fn with_directive<I, S>(mut self, name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), sources.into_iter().map(Into::into).collect());
        self
    }

    /// Switches to the report-only header.
    pub fn report_only(mut self) -> Self {
        self.report_only = true;
        self
    }

    /// The header these options write to.
    pub fn header_name(&self) -> &'static str {
        if self.report_only {
            REPORT_ONLY_HEADER
        } else {
            HEADER
        }
    }

    /// Renders the policy, or `None` when there is nothing to send.
    ///
    /// The default list renders as
    /// `default-src 'self'; base-uri 'self'; block-all-mixed-content;
    /// font-src 'self' https: data:; frame-ancestors 'self'; img-src 'self'
    /// data:; object-src 'none'; script-src 'self'; script-src-attr 'none';
    /// style-src 'self' https: 'unsafe-inline'; upgrade-insecure-requests`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if a key is not a directive name, two
    /// keys name the same directive, or a source contains `;` or `,`.
    pub fn header_value(&self) -> Result<Option<String>, Error> {
        let Some(directives) = &self.directives else {
            return Ok(Some(render(DEFAULT_DIRECTIVES.iter().map(|(name, sources)| {
                (name.to_string(), sources.iter().copied())
            }))));
        };
        if directives.is_empty() {
            return Ok(None);
        }

        let mut rendered: Vec<(String, &[String])> = Vec::with_capacity(directives.len());
        for (key, sources) in directives {
            let name = dashed(key).ok_or_else(|| {
                Error::invalid_option(Self::NAME, format!("'{}' is not a directive name", key))
            })?;
            if rendered.iter().any(|(seen, _)| *seen == name) {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("directive '{}' given twice", name),
                ));
            }
            if let Some(bad) = sources.iter().find(|s| s.contains(';') || s.contains(',')) {
                return Err(Error::invalid_option(
                    Self::NAME,
                    format!("source '{}' for '{}' contains a separator", bad, name),
                ));
            }
            rendered.push((name, sources.as_slice()));
        }

        Ok(Some(render(rendered.into_iter().map(|(name, sources)| {
            (name, sources.iter().map(String::as_str))
        }))))
    }
}

fn render<'s, D, S>(directives: D) -> String
where
    D: Iterator<Item = (String, S)>,
    S: Iterator<Item = &'s str>,
{
    directives
        .map(|(name, sources)| {
            let mut part = name;
            for source in sources {
                part.push(' ');
                part.push_str(source);
            }
            part
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl Directive for ContentSecurityPolicy {
    const NAME: &'static str = "csp";

    fn apply(&self, pair: &mut dyn RequestResponse) -> Result<(), Error> {
        match self.header_value()? {
            Some(value) => pair.set_response_header(self.header_name(), &value),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        self.header_value().map(drop)
    }

    fn setting(config: &Config) -> &Setting<Self> {
        &config.csp
    }

    fn setting_mut(config: &mut Config) -> &mut Setting<Self> {
        &mut config.csp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::MemoryPair;

    #[test]
    fn default_policy() {
        let value = ContentSecurityPolicy::default().header_value().unwrap().unwrap();
        assert!(value.starts_with("default-src 'self'; base-uri 'self'; block-all-mixed-content;"));
        assert!(value.ends_with("style-src 'self' https: 'unsafe-inline'; upgrade-insecure-requests"));
        assert_eq!(value.matches("; ").count(), DEFAULT_DIRECTIVES.len() - 1);
    }

    #[test]
    fn report_only_switches_header() {
        let mut pair = MemoryPair::default();
        ContentSecurityPolicy::default()
            .report_only()
            .apply(&mut pair)
            .unwrap();
        assert!(pair.response.contains_key(REPORT_ONLY_HEADER));
        assert!(!pair.response.contains_key(HEADER));
    }

    #[test]
    fn empty_directives_set_nothing() {
        let mut pair = MemoryPair::default();
        ContentSecurityPolicy::empty().apply(&mut pair).unwrap();
        assert!(pair.response.is_empty());
    }

    #[test]
    fn camel_and_dashed_duplicates_are_rejected() {
        let csp = ContentSecurityPolicy::empty()
            .with_directive("defaultSrc", ["'self'"])
            .with_directive("default-src", ["'none'"]);
        let err = csp.header_value().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { directive: "csp", .. }));
    }

    #[test]
    fn separators_in_sources_are_rejected() {
        let csp = ContentSecurityPolicy::empty()
            .with_directive("scriptSrc", ["'self'; object-src *"]);
        assert!(csp.header_value().is_err());
    }

    #[test]
    fn custom_directives_render_in_key_order() {
        let csp = ContentSecurityPolicy::empty()
            .with_directive("scriptSrc", ["'self'", "cdn.example.com"])
            .with_directive("defaultSrc", ["'none'"]);
        assert_eq!(
            csp.header_value().unwrap().as_deref(),
            Some("default-src 'none'; script-src 'self' cdn.example.com")
        );
    }

    #[test]
    fn capitalized_and_acronym_keys_are_dashed() {
        let csp = ContentSecurityPolicy::empty()
            .with_directive("DefaultSrc", ["'self'"])
            .with_directive("reportURI", ["/r"]);
        assert_eq!(
            csp.header_value().unwrap().as_deref(),
            Some("default-src 'self'; report-uri /r")
        );
    }

    #[test]
    fn keys_that_are_not_directive_names_are_rejected() {
        let mut pair = MemoryPair::default();
        let csp = ContentSecurityPolicy::empty()
            .with_directive("defaultSrc", ["'self'"])
            .with_directive("img src", ["*"]);

        let err = csp.apply(&mut pair).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { directive: "csp", .. }));
        assert!(csp.validate().is_err());
        assert!(pair.response.is_empty());
    }
}
