use crate::body::ResponseBody;
use http::header::InvalidHeaderValue;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// The response under construction.
///
/// The status starts as `404 Not Found`; a middleware that handles the request sets its own.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self { status: StatusCode::NOT_FOUND, headers: HeaderMap::new(), body: ResponseBody::empty() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Sets the header `name` to the comma separated list of `values`, replacing any previous value.
    ///
    /// # Example
    /// ```
    /// use micro_web::Response;
    ///
    /// let mut response = Response::new();
    /// response.set(http::header::ALLOW, ["GET", "HEAD"]).unwrap();
    /// assert_eq!(response.headers()[http::header::ALLOW], "GET, HEAD");
    /// ```
    pub fn set<I, V>(&mut self, name: HeaderName, values: I) -> Result<(), InvalidHeaderValue>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let joined = values.into_iter().map(|value| value.as_ref().to_owned()).collect::<Vec<_>>().join(", ");
        let value = HeaderValue::try_from(joined)?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<ResponseBody>) {
        self.body = body.into();
    }

    /// Converts into an `http::Response` for the host server to write
    pub fn into_http(self) -> http::Response<ResponseBody> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
