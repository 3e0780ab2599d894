//! HTTP execution abstraction for testing.
//!
//! This module provides a trait for HTTP execution that can be mocked in tests,
//! avoiding the need for actual network calls.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for executing HTTP requests.
///
/// Implementations can use real HTTP clients or mock responses for testing.
pub trait HttpExecutor {
    /// Execute an HTTP request and return the response.
    ///
    /// Any status code counts as a response; only transport failures are `Err`.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Box<E> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        (**self).execute(request)
    }
}

/// Production HTTP executor using reqwest.
pub struct ReqwestExecutor {
    client: Client,
    timeout: Duration,
}

impl ReqwestExecutor {
    /// Create a new executor with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, timeout })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(DEFAULT_TIMEOUT)
    }

    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout(self.timeout)
        } else if error.is_connect() {
            Error::Connection {
                message: error.to_string(),
            }
        } else {
            Error::Http(error)
        }
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(headers);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        let response = req_builder.send().map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let body_text = response.text().map_err(|e| self.classify(e))?;

        Ok(HttpResponse {
            status,
            status_text,
            body_text,
        })
    }
}

/// Mock HTTP executor for testing.
///
/// Returns a configured response for every request and records what it was
/// asked to send.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    enum Reply {
        Respond(HttpResponse),
        Timeout,
        Refuse(String),
    }

    /// A mock HTTP executor that returns predefined responses.
    #[derive(Clone)]
    pub struct MockExecutor {
        reply: Arc<Mutex<Reply>>,
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Default for MockExecutor {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockExecutor {
        /// Create a mock that answers every request with `404 Not Found`.
        pub fn new() -> Self {
            Self {
                reply: Arc::new(Mutex::new(Reply::Respond(Self::status_response(404)))),
                recorded_requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Answer every request with the given response.
        pub fn with_response(self, response: HttpResponse) -> Self {
            *self.reply.lock().unwrap() = Reply::Respond(response);
            self
        }

        /// Answer every request with `200 OK` and the given JSON body.
        pub fn with_json(self, body: serde_json::Value) -> Self {
            self.with_response(Self::success_response(body))
        }

        /// Answer every request with an empty body and the given status.
        pub fn with_status(self, status: u16) -> Self {
            self.with_response(Self::status_response(status))
        }

        /// Fail every request as if it timed out.
        pub fn timing_out(self) -> Self {
            *self.reply.lock().unwrap() = Reply::Timeout;
            self
        }

        /// Fail every request as if the connection was refused.
        pub fn refusing(self, message: impl Into<String>) -> Self {
            *self.reply.lock().unwrap() = Reply::Refuse(message.into());
            self
        }

        /// Requests executed so far, oldest first.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.recorded_requests.lock().unwrap().clone()
        }

        pub fn success_response(body: serde_json::Value) -> HttpResponse {
            HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                body_text: body.to_string(),
            }
        }

        pub fn status_response(status: u16) -> HttpResponse {
            HttpResponse {
                status,
                status_text: String::new(),
                body_text: String::new(),
            }
        }
    }

    impl HttpExecutor for MockExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.recorded_requests.lock().unwrap().push(request.clone());

            match self.reply.lock().unwrap().clone() {
                Reply::Respond(response) => Ok(response),
                Reply::Timeout => Err(Error::Timeout(DEFAULT_TIMEOUT)),
                Reply::Refuse(message) => Err(Error::Connection { message }),
            }
        }
    }
}
