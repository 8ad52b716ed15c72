//! Transport abstraction for the pages and databases endpoints

use async_trait::async_trait;
use thiserror::Error;

use crate::property::{Properties, QueryResponse, RawPage};
use crate::query::QueryArgs;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Timeout")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Parse error: {message}")]
    ParseError { message: String },
}

/// The remote calls a [`Model`](crate::Model) needs.
///
/// Implementations own timeouts and authentication; the model never
/// retries.
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Create a page in the database and return it.
    async fn create_page(
        &self,
        database_id: &str,
        properties: Properties,
    ) -> Result<RawPage, TransportError>;

    /// Query the database. Only the first page of results is returned.
    async fn query_database(
        &self,
        database_id: &str,
        args: &QueryArgs,
    ) -> Result<QueryResponse, TransportError>;

    /// Retrieve a single page by id.
    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, TransportError>;
}
