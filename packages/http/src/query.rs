//! Per-mode request builders.
//!
//! Each builder is a pure function from user text and search settings to an
//! [`HttpRequest`]. Search requests carry the API key in a header; enrichment
//! requests carry it as a query parameter, which is what the API expects.

use url::{form_urlencoded, Url};

use crate::error::Error;
use crate::mode::Mode;
use crate::types::HttpRequest;

/// Base URL of the production API.
pub const DEFAULT_API_URL: &str = "https://api.peopledatalabs.com/v5";

/// Header carrying the API key on search requests.
pub const API_KEY_HEADER: &str = "X-api-key";

/// Query parameter carrying the API key on enrichment requests.
pub const API_KEY_PARAM: &str = "api_key";

/// Resolved endpoint URLs for one API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    enrich: Url,
    search: Url,
}

impl Endpoints {
    /// Resolve the person endpoints below `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            enrich: base.join("person/enrich")?,
            search: base.join("person/search")?,
        })
    }

    pub fn enrich(&self) -> &Url {
        &self.enrich
    }

    pub fn search(&self) -> &Url {
        &self.search
    }
}

/// One query as typed by the user, with the settings in force at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub mode: Mode,
    pub text: String,
    pub size: u32,
    pub offset: u32,
}

/// Build the request for `query` in its mode.
pub fn build_request(api_key: &str, query: &QueryRequest, endpoints: &Endpoints) -> HttpRequest {
    match query.mode {
        Mode::Sql => search_request("sql", api_key, &query.text, query.size, query.offset, endpoints),
        Mode::Es => search_request("query", api_key, &query.text, query.size, query.offset, endpoints),
        Mode::Enrich => enrich_request(api_key, &query.text, endpoints),
    }
}

/// Build a person search request with the query text under `param`.
pub fn search_request(
    param: &str,
    api_key: &str,
    text: &str,
    size: u32,
    offset: u32,
    endpoints: &Endpoints,
) -> HttpRequest {
    HttpRequest::get(endpoints.search().clone())
        .with_header("Content-Type", "application/json")
        .with_header(API_KEY_HEADER, api_key)
        .with_query(param, text.trim())
        .with_query("size", size.to_string())
        .with_query("from", offset.to_string())
        .with_query("pretty", "true")
}

/// Build a person enrichment request from a URL-encoded query string.
///
/// Lines of a multi-line entry are joined with `&`, and a leading `?` is
/// ignored. A key may repeat. The configured API key is only added when the
/// text does not carry its own `api_key`.
pub fn enrich_request(api_key: &str, text: &str, endpoints: &Endpoints) -> HttpRequest {
    let params = parse_enrich_params(text);

    let mut request = HttpRequest::get(endpoints.enrich().clone())
        .with_header("Content-Type", "application/json");

    if !params.iter().any(|(k, _)| k == API_KEY_PARAM) {
        request = request.with_query(API_KEY_PARAM, api_key);
    }

    for (name, value) in params {
        request = request.with_query(name, value);
    }

    request
}

fn parse_enrich_params(text: &str) -> Vec<(String, String)> {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("&");
    let joined = joined.strip_prefix('?').unwrap_or(&joined);

    form_urlencoded::parse(joined.as_bytes())
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
