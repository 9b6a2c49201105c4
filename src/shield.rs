use std::sync::OnceLock;

use crate::{
    config::Config,
    directive,
    framework::{Adapter, Framework, FrameworkKind, NativeRequest},
    lifecycle::Lifecycle,
    report::{Recorder, Report},
    Error,
};

/// The orchestrator: one selector token, one configuration, many invocations.
///
/// Construction never fails and does no work. [`initialize`](Self::initialize)
/// resolves the selector token once; after that, [`invoke`](Self::invoke)
/// and [`apply`](Self::apply) may be called from any number of threads on
/// independent native pairs. Nothing the shield owns is mutated by an
/// invocation.
///
/// # Examples
///
/// ```
/// use header_shield::{Config, DnsPrefetchControl, HidePoweredBy, Shield};
///
/// let config = Config::default()
///     .enable(DnsPrefetchControl { allow: true })
///     .enable(HidePoweredBy::set_to("PHP 4.2.0"));
///
/// let shield = Shield::new("axum", config);
/// shield.initialize().unwrap();
///
/// let request = http::Request::new(());
/// let mut response = http::Response::builder()
///     .header("x-powered-by", "Express")
///     .body(())
///     .unwrap();
///
/// let response = shield.invoke(&request, &mut response).unwrap();
/// assert_eq!(response.headers()["x-dns-prefetch-control"], "on");
/// assert_eq!(response.headers()["x-powered-by"], "PHP 4.2.0");
/// assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
/// ```
#[derive(Debug)]
pub struct Shield {
    framework: String,
    config: Config,
    resolved: OnceLock<FrameworkKind>,
}

impl Shield {
    /// Creates an unconfigured shield. The token is not looked at yet.
    pub fn new(framework: impl Into<String>, config: Config) -> Self {
        Self {
            framework: framework.into(),
            config,
            resolved: OnceLock::new(),
        }
    }

    /// The selector token given at construction.
    pub fn framework(&self) -> &str {
        &self.framework
    }

    /// The configuration given at construction.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        match self.resolved.get() {
            Some(kind) => Lifecycle::Initialized(*kind),
            None => Lifecycle::Unconfigured,
        }
    }

    /// Resolves the selector token and checks the configuration. Calling it
    /// again is a no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownFramework`] if the token names no adapter.
    /// - [`Error::InvalidOption`] if an enabled directive's options can never
    ///   render.
    ///
    /// On error the shield stays [`Lifecycle::Unconfigured`].
    pub fn initialize(&self) -> Result<FrameworkKind, Error> {
        if let Some(kind) = self.resolved.get() {
            return Ok(*kind);
        }

        let kind = match FrameworkKind::resolve(&self.framework) {
            Ok(kind) => kind,
            Err(err) => {
                tracing::warn!(token = %self.framework, "unknown framework selector");
                return Err(err);
            }
        };
        if let Err(err) = self.config.validate() {
            tracing::warn!(error = %err, "rejected directive configuration");
            return Err(err);
        }

        // Only the thread that wins the race logs the transition.
        let kind = *self.resolved.get_or_init(|| {
            tracing::info!(framework = %kind, token = %self.framework, "header shield initialized");
            kind
        });
        Ok(kind)
    }

    /// Runs every directive over the native pair and hands back the response.
    ///
    /// The response is mutated in place; the returned reference is the one
    /// passed in.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn invoke<'r, Req, Res>(&self, request: &Req, response: &'r mut Res) -> Result<&'r mut Res, Error>
    where
        Req: NativeRequest,
        Req::Framework: Adapter<Req, Res>,
    {
        self.apply(request, &mut *response)?;
        Ok(response)
    }

    /// Runs every directive over the native pair and reports what changed.
    ///
    /// Directives run in registry order (see [`directive::names`]). A
    /// disabled entry is skipped, an absent one runs with its defaults.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`] before a successful `initialize`; nothing
    ///   is touched.
    /// - [`Error::FrameworkMismatch`] if the native types belong to a
    ///   different adapter than the resolved one; nothing is touched.
    /// - [`Error::MalformedNativeObject`] if the adapter cannot wrap the pair.
    /// - The first directive failure. Mutations made by earlier directives
    ///   stay on the response.
    pub fn apply<Req, Res>(&self, request: &Req, response: &mut Res) -> Result<Report, Error>
    where
        Req: NativeRequest,
        Req::Framework: Adapter<Req, Res>,
    {
        let expected = *self.resolved.get().ok_or(Error::NotInitialized)?;
        let found = <Req::Framework as Framework>::KIND;
        if found != expected {
            return Err(Error::FrameworkMismatch { expected, found });
        }

        let span = tracing::debug_span!("header_shield.apply", framework = %expected);
        let _enter = span.enter();

        let mut pair = <Req::Framework as Adapter<Req, Res>>::adapt(request, response)?;
        let mut recorder = Recorder::new(&mut pair);
        let mut report = Report::new(expected);

        for entry in directive::registry() {
            recorder.begin(entry.name);
            match (entry.run)(&self.config, &mut recorder) {
                Ok(true) => {
                    tracing::trace!(directive = entry.name, "applied");
                    report.record_applied(entry.name);
                }
                Ok(false) => {
                    tracing::trace!(directive = entry.name, "skipped");
                    report.record_skipped(entry.name);
                }
                Err(err) => {
                    tracing::error!(directive = entry.name, error = %err, "directive failed");
                    return Err(err);
                }
            }
        }

        report.extend(recorder.into_mutations());
        tracing::debug!(mutations = report.mutations().len(), "directives applied");
        Ok(report)
    }
}
