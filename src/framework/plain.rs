//! Adapter for hosts that keep headers in a plain string map.
//!
//! Keys are compared exactly: `X-Powered-By` and `x-powered-by` are two
//! different entries, the same way the host's own map treats them.

use std::collections::HashMap;

use super::{Adapter, Framework, FrameworkKind, NativeRequest};
use crate::{Error, RequestResponse};

/// Access to a native object's string-keyed header table.
///
/// Host types whose header storage is optional (not yet allocated, already
/// sent) return `None`, which the adapter reports as
/// [`Error::MalformedNativeObject`].
///
/// # Examples
///
/// ```
/// use header_shield::HeaderTable;
/// use std::collections::HashMap;
///
/// struct HostResponse {
///     headers: Option<HashMap<String, String>>,
/// }
///
/// impl HeaderTable for HostResponse {
///     fn header_table(&self) -> Option<&HashMap<String, String>> {
///         self.headers.as_ref()
///     }
///
///     fn header_table_mut(&mut self) -> Option<&mut HashMap<String, String>> {
///         self.headers.as_mut()
///     }
/// }
/// ```
pub trait HeaderTable {
    /// The header table, if this object has one.
    fn header_table(&self) -> Option<&HashMap<String, String>>;

    /// The mutable header table, if this object has one.
    fn header_table_mut(&mut self) -> Option<&mut HashMap<String, String>>;
}

impl HeaderTable for HashMap<String, String> {
    fn header_table(&self) -> Option<&HashMap<String, String>> {
        Some(self)
    }

    fn header_table_mut(&mut self) -> Option<&mut HashMap<String, String>> {
        Some(self)
    }
}

impl NativeRequest for HashMap<String, String> {
    type Framework = Plain;
}

/// Adapter family for string-map hosts.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

impl Framework for Plain {
    const KIND: FrameworkKind = FrameworkKind::Plain;
}

impl<Req: HeaderTable, Res: HeaderTable> Adapter<Req, Res> for Plain {
    type Pair<'a>
        = PlainPair<'a, Req, Res>
    where
        Req: 'a,
        Res: 'a;

    fn adapt<'a>(
        request: &'a Req,
        response: &'a mut Res,
    ) -> Result<PlainPair<'a, Req, Res>, Error> {
        PlainPair::new(request, response)
    }
}

/// A string-map request/response pair adapted to [`RequestResponse`].
#[derive(Debug)]
pub struct PlainPair<'a, Req, Res> {
    request: &'a Req,
    response: &'a mut Res,
}

impl<'a, Req: HeaderTable, Res: HeaderTable> PlainPair<'a, Req, Res> {
    /// Wraps a native request and response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedNativeObject`] if either side has no header
    /// table.
    pub fn new(request: &'a Req, response: &'a mut Res) -> Result<Self, Error> {
        if request.header_table().is_none() {
            return Err(Error::malformed(FrameworkKind::Plain, "request has no header table"));
        }
        if response.header_table_mut().is_none() {
            return Err(Error::malformed(FrameworkKind::Plain, "response has no header table"));
        }
        Ok(Self { request, response })
    }

    /// Returns the wrapped native request.
    pub fn request(&self) -> &Req {
        self.request
    }

    /// Returns the wrapped native response.
    pub fn response(&self) -> &Res {
        &*self.response
    }

    /// Releases the pair, handing back the native response.
    pub fn into_response(self) -> &'a mut Res {
        self.response
    }

    fn table_mut(&mut self) -> Result<&mut HashMap<String, String>, Error> {
        self.response
            .header_table_mut()
            .ok_or_else(|| Error::malformed(FrameworkKind::Plain, "response has no header table"))
    }
}

impl<Req: HeaderTable, Res: HeaderTable> RequestResponse for PlainPair<'_, Req, Res> {
    fn request_header(&self, key: &str) -> Option<String> {
        self.request.header_table()?.get(key).cloned()
    }

    fn response_header(&self, key: &str) -> Option<String> {
        self.response.header_table()?.get(key).cloned()
    }

    fn set_response_header(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.table_mut()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_response_header(&mut self, key: &str) -> Result<(), Error> {
        self.table_mut()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Unsent {
        headers: Option<HashMap<String, String>>,
    }

    impl HeaderTable for Unsent {
        fn header_table(&self) -> Option<&HashMap<String, String>> {
            self.headers.as_ref()
        }

        fn header_table_mut(&mut self) -> Option<&mut HashMap<String, String>> {
            self.headers.as_mut()
        }
    }

    fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_are_case_sensitive() {
        let request = table(&[("Accept", "text/html")]);
        let mut response = table(&[("X-Powered-By", "Pogo")]);

        let pair = PlainPair::new(&request, &mut response).unwrap();
        assert_eq!(pair.request_header("Accept").as_deref(), Some("text/html"));
        assert_eq!(pair.request_header("accept"), None);
        assert_eq!(pair.response_header("x-powered-by"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let request = table(&[]);
        let mut response = table(&[]);

        let mut pair = PlainPair::new(&request, &mut response).unwrap();
        pair.set_response_header("Referrer-Policy", "no-referrer").unwrap();
        assert_eq!(
            pair.response_header("Referrer-Policy").as_deref(),
            Some("no-referrer")
        );
    }

    #[test]
    fn set_overwrites() {
        let request = table(&[]);
        let mut response = table(&[("X-Frame-Options", "DENY")]);

        let mut pair = PlainPair::new(&request, &mut response).unwrap();
        pair.set_response_header("X-Frame-Options", "SAMEORIGIN").unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response["X-Frame-Options"], "SAMEORIGIN");
    }

    #[test]
    fn remove_only_touches_exact_key() {
        let request = table(&[]);
        let mut response = table(&[("x-powered-by", "Pogo")]);

        let mut pair = PlainPair::new(&request, &mut response).unwrap();
        pair.remove_response_header("X-Powered-By").unwrap();
        assert_eq!(response.get("x-powered-by").map(String::as_str), Some("Pogo"));
    }

    #[test]
    fn missing_response_table_is_malformed() {
        let request = table(&[]);
        let mut response = Unsent::default();

        let err = PlainPair::new(&request, &mut response).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedNativeObject {
                framework: FrameworkKind::Plain,
                detail: "response has no header table",
            }
        );
    }

    #[test]
    fn missing_request_table_is_malformed() {
        let request = Unsent::default();
        let mut response = table(&[]);

        let err = PlainPair::new(&request, &mut response).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedNativeObject {
                detail: "request has no header table",
                ..
            }
        ));
    }
}
