//! Per-invocation record of what the directive pipeline did.
//!
//! A [`Report`] only ever holds header names, header values the directives
//! themselves produced, and directive names. Request headers are never
//! copied into it.

use std::fmt;

use crate::framework::FrameworkKind;
use crate::{Error, RequestResponse};

/// What happened to one response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Header set to this value, replacing any previous one
    Set(String),
    /// Header removed
    Removed,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Set(value) => write!(f, "set to '{}'", value),
            Change::Removed => write!(f, "removed"),
        }
    }
}

/// One header mutation, tagged with the directive that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    directive: &'static str,
    header: String,
    change: Change,
}

impl Mutation {
    /// Registry name of the directive responsible.
    pub fn directive(&self) -> &'static str {
        self.directive
    }

    /// Header name exactly as the directive passed it.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The change applied.
    pub fn change(&self) -> &Change {
        &self.change
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.directive, self.header, self.change)
    }
}

/// Outcome of one [`Shield::apply`](crate::Shield::apply) call.
///
/// # Examples
///
/// ```
/// use header_shield::{Change, Config, Shield};
///
/// let shield = Shield::new("http", Config::default());
/// shield.initialize().unwrap();
///
/// let request = http::Request::new(());
/// let mut response = http::Response::new(());
/// let report = shield.apply(&request, &mut response).unwrap();
///
/// let first = &report.mutations()[0];
/// assert_eq!(first.directive(), "crossdomain");
/// assert_eq!(first.change(), &Change::Set("none".to_string()));
/// assert!(report.skipped().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    framework: FrameworkKind,
    applied: Vec<&'static str>,
    skipped: Vec<&'static str>,
    mutations: Vec<Mutation>,
}

impl Report {
    pub(crate) fn new(framework: FrameworkKind) -> Self {
        Self {
            framework,
            applied: Vec::new(),
            skipped: Vec::new(),
            mutations: Vec::new(),
        }
    }

    pub(crate) fn record_applied(&mut self, directive: &'static str) {
        self.applied.push(directive);
    }

    pub(crate) fn record_skipped(&mut self, directive: &'static str) {
        self.skipped.push(directive);
    }

    pub(crate) fn extend(&mut self, mutations: Vec<Mutation>) {
        self.mutations.extend(mutations);
    }

    /// Adapter the invocation ran through.
    pub fn framework(&self) -> FrameworkKind {
        self.framework
    }

    /// Directives that ran, in registry order.
    pub fn applied(&self) -> &[&'static str] {
        &self.applied
    }

    /// Directives suppressed by the disabled sentinel, in registry order.
    pub fn skipped(&self) -> &[&'static str] {
        &self.skipped
    }

    /// Every header mutation, in the order it was made.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Mutations made by one directive.
    pub fn mutations_by<'a>(&'a self, directive: &'a str) -> impl Iterator<Item = &'a Mutation> {
        self.mutations
            .iter()
            .filter(move |mutation| mutation.directive == directive)
    }
}

/// Pass-through [`RequestResponse`] that records response mutations.
///
/// Removing a header that was not there is not recorded, since nothing
/// changed.
pub(crate) struct Recorder<'p, P: RequestResponse + ?Sized> {
    inner: &'p mut P,
    directive: &'static str,
    mutations: Vec<Mutation>,
}

impl<'p, P: RequestResponse + ?Sized> Recorder<'p, P> {
    pub(crate) fn new(inner: &'p mut P) -> Self {
        Self {
            inner,
            directive: "",
            mutations: Vec::new(),
        }
    }

    /// Attributes subsequent mutations to `directive`.
    pub(crate) fn begin(&mut self, directive: &'static str) {
        self.directive = directive;
    }

    pub(crate) fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }

    fn record(&mut self, header: &str, change: Change) {
        self.mutations.push(Mutation {
            directive: self.directive,
            header: header.to_string(),
            change,
        });
    }
}

impl<P: RequestResponse + ?Sized> RequestResponse for Recorder<'_, P> {
    fn request_header(&self, key: &str) -> Option<String> {
        self.inner.request_header(key)
    }

    fn response_header(&self, key: &str) -> Option<String> {
        self.inner.response_header(key)
    }

    fn set_response_header(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.inner.set_response_header(key, value)?;
        self.record(key, Change::Set(value.to_string()));
        Ok(())
    }

    fn remove_response_header(&mut self, key: &str) -> Result<(), Error> {
        let existed = self.inner.response_header(key).is_some();
        self.inner.remove_response_header(key)?;
        if existed {
            self.record(key, Change::Removed);
        }
        Ok(())
    }
}
