//! # pdl-http
//!
//! Request builders and a blocking client for the People Data Labs person API.
//!
//! Three query modes are supported:
//!
//! - [`Mode::Sql`]: SQL text sent to `/person/search` as `sql`
//! - [`Mode::Es`]: ElasticSearch JSON sent to `/person/search` as `query`
//! - [`Mode::Enrich`]: URL-encoded parameters sent to `/person/enrich`
//!
//! ## Example
//!
//! ```ignore
//! use pdl_http::{Mode, PdlClient, QueryRequest, DEFAULT_API_URL};
//!
//! let client = PdlClient::new("my-api-key", DEFAULT_API_URL)?;
//! let result = client.execute(&QueryRequest {
//!     mode: Mode::Sql,
//!     text: "SELECT * FROM person WHERE job_company_name='acme'".into(),
//!     size: 1,
//!     offset: 0,
//! });
//! ```
//!
//! The [`HttpExecutor`] trait is the seam for testing: enable the `mock`
//! feature to get [`executor::mock::MockExecutor`].

pub mod client;
pub mod error;
pub mod executor;
pub mod mode;
pub mod query;
pub mod types;

pub use client::PdlClient;
pub use error::{Error, QueryError};
pub use executor::{HttpExecutor, ReqwestExecutor, DEFAULT_TIMEOUT};
pub use mode::{Mode, UnknownMode};
pub use query::{build_request, Endpoints, QueryRequest, DEFAULT_API_URL};
pub use types::{HttpRequest, HttpResponse};
