use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::error::{Error, QueryError};
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::query::{build_request, Endpoints, QueryRequest};

/// Blocking client for the person API.
///
/// One call to [`PdlClient::execute`] sends exactly one request. There are no
/// retries.
pub struct PdlClient<E = ReqwestExecutor> {
    executor: E,
    api_key: String,
    endpoints: Endpoints,
}

impl PdlClient<ReqwestExecutor> {
    /// Create a client for `api_url` using reqwest with the default timeout.
    pub fn new(api_key: impl Into<String>, api_url: &str) -> Result<Self, Error> {
        Ok(Self::with_executor(
            ReqwestExecutor::with_default_timeout()?,
            api_key,
            Endpoints::new(api_url)?,
        ))
    }
}

impl<E: HttpExecutor> PdlClient<E> {
    /// Create a client with a custom executor
    pub fn with_executor(executor: E, api_key: impl Into<String>, endpoints: Endpoints) -> Self {
        Self {
            executor,
            api_key: api_key.into(),
            endpoints,
        }
    }

    /// Send `query` and return the parsed JSON body.
    ///
    /// Any non-2xx status collapses to [`QueryError::Rejected`]; the body of a
    /// rejected response is never inspected.
    pub fn execute(&self, query: &QueryRequest) -> Result<JsonValue, QueryError> {
        let request = build_request(&self.api_key, query, &self.endpoints);
        debug!(
            mode = %query.mode,
            url = %request.url,
            params = ?request.query_names(),
            "sending query"
        );

        let response = self.executor.execute(&request).map_err(|e| {
            warn!(mode = %query.mode, error = %e, "query failed");
            QueryError::from(e)
        })?;

        if !response.is_success() {
            warn!(
                mode = %query.mode,
                status = response.status,
                reason = %response.status_text,
                "query rejected"
            );
            return Err(QueryError::Rejected(query.mode));
        }

        response.json().map_err(|e| {
            warn!(mode = %query.mode, error = %e, "response body is not JSON");
            QueryError::Decode(e.to_string())
        })
    }
}
