//! Adapter for native types from the `http` crate.
//!
//! Covers every host built on `http::Request`/`http::Response` (axum, hyper,
//! tower middleware). `HeaderMap` lookups are case-insensitive, so this
//! adapter is too.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use super::{Adapter, Framework, FrameworkKind, NativeRequest};
use crate::{Error, RequestResponse};

/// Read access to a native object's header storage.
///
/// Returns `None` when the native object has no usable header map, for
/// example a builder that already recorded an error.
pub trait HeaderSource {
    /// The header map, if this object has one.
    fn header_map(&self) -> Option<&HeaderMap>;
}

/// Write access to a native response's header storage.
pub trait HeaderSink: HeaderSource {
    /// The mutable header map, if this object has one.
    fn header_map_mut(&mut self) -> Option<&mut HeaderMap>;
}

impl<B> HeaderSource for http::Request<B> {
    fn header_map(&self) -> Option<&HeaderMap> {
        Some(self.headers())
    }
}

impl HeaderSource for http::request::Parts {
    fn header_map(&self) -> Option<&HeaderMap> {
        Some(&self.headers)
    }
}

impl HeaderSource for http::request::Builder {
    fn header_map(&self) -> Option<&HeaderMap> {
        self.headers_ref()
    }
}

impl<B> HeaderSource for http::Response<B> {
    fn header_map(&self) -> Option<&HeaderMap> {
        Some(self.headers())
    }
}

impl<B> HeaderSink for http::Response<B> {
    fn header_map_mut(&mut self) -> Option<&mut HeaderMap> {
        Some(self.headers_mut())
    }
}

impl HeaderSource for http::response::Parts {
    fn header_map(&self) -> Option<&HeaderMap> {
        Some(&self.headers)
    }
}

impl HeaderSink for http::response::Parts {
    fn header_map_mut(&mut self) -> Option<&mut HeaderMap> {
        Some(&mut self.headers)
    }
}

impl HeaderSource for http::response::Builder {
    fn header_map(&self) -> Option<&HeaderMap> {
        self.headers_ref()
    }
}

impl HeaderSink for http::response::Builder {
    fn header_map_mut(&mut self) -> Option<&mut HeaderMap> {
        self.headers_mut()
    }
}

impl HeaderSource for HeaderMap {
    fn header_map(&self) -> Option<&HeaderMap> {
        Some(self)
    }
}

impl HeaderSink for HeaderMap {
    fn header_map_mut(&mut self) -> Option<&mut HeaderMap> {
        Some(self)
    }
}

impl<B> NativeRequest for http::Request<B> {
    type Framework = Http;
}

impl NativeRequest for http::request::Parts {
    type Framework = Http;
}

impl NativeRequest for http::request::Builder {
    type Framework = Http;
}

impl NativeRequest for HeaderMap {
    type Framework = Http;
}

/// Adapter family for the `http` crate.
#[derive(Debug, Clone, Copy)]
pub struct Http;

impl Framework for Http {
    const KIND: FrameworkKind = FrameworkKind::Http;
}

impl<Req: HeaderSource, Res: HeaderSink> Adapter<Req, Res> for Http {
    type Pair<'a>
        = HttpPair<'a, Req, Res>
    where
        Req: 'a,
        Res: 'a;

    fn adapt<'a>(request: &'a Req, response: &'a mut Res) -> Result<HttpPair<'a, Req, Res>, Error> {
        HttpPair::new(request, response)
    }
}

/// An `http` request/response pair adapted to [`RequestResponse`].
///
/// # Examples
///
/// ```
/// use header_shield::{HttpPair, RequestResponse};
///
/// let request = http::Request::builder()
///     .header("user-agent", "curl/8.0")
///     .body(())
///     .unwrap();
/// let mut response = http::Response::new(());
///
/// let mut pair = HttpPair::new(&request, &mut response).unwrap();
/// assert_eq!(pair.request_header("User-Agent").as_deref(), Some("curl/8.0"));
///
/// pair.set_response_header("X-Frame-Options", "DENY").unwrap();
/// assert_eq!(response.headers()["x-frame-options"], "DENY");
/// ```
#[derive(Debug)]
pub struct HttpPair<'a, Req, Res> {
    request: &'a Req,
    response: &'a mut Res,
}

impl<'a, Req: HeaderSource, Res: HeaderSink> HttpPair<'a, Req, Res> {
    /// Wraps a native request and response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedNativeObject`] if either side has no header
    /// map.
    pub fn new(request: &'a Req, response: &'a mut Res) -> Result<Self, Error> {
        if request.header_map().is_none() {
            return Err(Error::malformed(FrameworkKind::Http, "request has no header map"));
        }
        if response.header_map_mut().is_none() {
            return Err(Error::malformed(FrameworkKind::Http, "response has no header map"));
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

    fn response_headers_mut(&mut self) -> Result<&mut HeaderMap, Error> {
        self.response
            .header_map_mut()
            .ok_or_else(|| Error::malformed(FrameworkKind::Http, "response has no header map"))
    }
}

fn read(map: Option<&HeaderMap>, key: &str) -> Option<String> {
    // Invalid names are never present, so `get` answers None for them.
    map?.get(key).map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

impl<Req: HeaderSource, Res: HeaderSink> RequestResponse for HttpPair<'_, Req, Res> {
    fn request_header(&self, key: &str) -> Option<String> {
        read(self.request.header_map(), key)
    }

    fn response_header(&self, key: &str) -> Option<String> {
        read(self.response.header_map(), key)
    }

    fn set_response_header(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| Error::invalid_header(key, "not a valid header name"))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::invalid_header(key, "value contains forbidden characters"))?;
        self.response_headers_mut()?.insert(name, value);
        Ok(())
    }

    fn remove_response_header(&mut self, key: &str) -> Result<(), Error> {
        self.response_headers_mut()?.remove(key);
        Ok(())
    }
}
