//! Framework-independent HTTP security headers.
//!
//! This crate applies a configurable set of security-header directives to an
//! outgoing response, whichever web framework produced it. It is built from:
//! - **A capability contract**: [`RequestResponse`], the four header
//!   operations every framework's native pair is adapted to
//! - **Framework adapters**: [`Http`] for the `http` crate and [`Plain`] for
//!   string maps, selected by name through [`FrameworkKind`]
//! - **Directives**: small header mutations with declarative defaults, run in a
//!   fixed order (see [`directive::names`])
//!
//! # Core Types
//!
//! - [`Shield`]: the orchestrator, holding a selector token and a [`Config`]
//! - [`Config`]: one [`Setting`] per directive (default, disabled or enabled)
//! - [`Report`]: the header mutations one invocation made
//! - [`Error`]: every failure the crate can return
//!
//! # Examples
//!
//! ```
//! use header_shield::{Config, Frameguard, Hsts, Shield};
//!
//! let config = Config::default()
//!     .enable(Frameguard::deny())
//!     .disable::<Hsts>();
//!
//! let shield = Shield::new("http", config);
//! shield.initialize().expect("known framework");
//!
//! let request = http::Request::new(());
//! let mut response = http::Response::new("hello");
//! shield.invoke(&request, &mut response).expect("headers applied");
//!
//! assert_eq!(response.headers()["x-frame-options"], "DENY");
//! assert_eq!(response.headers()["x-content-type-options"], "nosniff");
//! assert!(response.headers().get("strict-transport-security").is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod contract;
pub mod directive;
mod error;
pub mod framework;
mod lifecycle;
mod report;
mod shield;

pub use config::{Config, Setting, SettingKind};
pub use contract::RequestResponse;
pub use directive::{
    ContentSecurityPolicy, CrossDomain, Directive, DnsPrefetchControl, DontSniffMimetype, ExpectCt,
    FeaturePolicy, FrameAction, Frameguard, HidePoweredBy, Hsts, IeNoOpen, PermittedPolicies,
    Referrer, ReferrerPolicy, XssProtection,
};
pub use error::Error;
pub use framework::{
    Adapter, Framework, FrameworkKind, HeaderSink, HeaderSource, HeaderTable, Http, HttpPair,
    NativeRequest, Plain, PlainPair,
};
pub use lifecycle::Lifecycle;
pub use report::{Change, Mutation, Report};
pub use shield::Shield;
