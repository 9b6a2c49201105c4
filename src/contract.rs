//! The request/response capability contract.
//!
//! Every supported framework's native request/response pair is adapted to
//! [`RequestResponse`]. Directives only ever see this trait, which is what keeps
//! them independent of the framework that produced the exchange.

use crate::Error;

/// Header access over one adapted request/response pair.
///
/// Keys are passed through to the adapter verbatim. Whether `X-Powered-By` and
/// `x-powered-by` name the same header is decided by the adapter, because
/// native frameworks disagree on it.
///
/// # Contract
///
/// - Reads return `None` when the header is not set, never an empty string.
/// - `set_response_header` replaces every existing value for the key.
/// - `remove_response_header` on a missing key succeeds and does nothing.
/// - Errors only come from the native side: missing header storage or a name
///   or value the native framework refuses.
///
/// # Examples
///
/// ```
/// use header_shield::{Error, RequestResponse};
/// use std::collections::HashMap;
///
/// struct Fake {
///     request: HashMap<String, String>,
///     response: HashMap<String, String>,
/// }
///
/// impl RequestResponse for Fake {
///     fn request_header(&self, key: &str) -> Option<String> {
///         self.request.get(key).cloned()
///     }
///
///     fn response_header(&self, key: &str) -> Option<String> {
///         self.response.get(key).cloned()
///     }
///
///     fn set_response_header(&mut self, key: &str, value: &str) -> Result<(), Error> {
///         self.response.insert(key.to_string(), value.to_string());
///         Ok(())
///     }
///
///     fn remove_response_header(&mut self, key: &str) -> Result<(), Error> {
///         self.response.remove(key);
///         Ok(())
///     }
/// }
///
/// let mut fake = Fake { request: HashMap::new(), response: HashMap::new() };
/// fake.set_response_header("X-Frame-Options", "DENY").unwrap();
/// assert_eq!(fake.response_header("X-Frame-Options").as_deref(), Some("DENY"));
/// assert_eq!(fake.request_header("Host"), None);
/// ```
pub trait RequestResponse {
    /// Returns the value of a request header, or `None` if absent.
    fn request_header(&self, key: &str) -> Option<String>;

    /// Returns the value of a response header, or `None` if absent.
    fn response_header(&self, key: &str) -> Option<String>;

    /// Sets a response header, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the native response lost its header storage or the
    /// native framework rejects the name or value.
    fn set_response_header(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Removes a response header. Missing headers are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the native response lost its header storage.
    fn remove_response_header(&mut self, key: &str) -> Result<(), Error>;
}
