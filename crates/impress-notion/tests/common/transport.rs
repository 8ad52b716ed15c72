//! In-memory transport that records every call

use std::sync::Mutex;

use async_trait::async_trait;
use impress_notion::property::Properties;
use impress_notion::{PageTransport, QueryArgs, QueryResponse, RawPage, TransportError};

/// Page id assigned to pages created through [`MockTransport`].
#[allow(dead_code)]
pub const CREATED_PAGE_ID: &str = "created-page";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreatePage {
        database_id: String,
        properties: Properties,
    },
    QueryDatabase {
        database_id: String,
        args: QueryArgs,
    },
    RetrievePage {
        page_id: String,
    },
}

/// Echoes created pages back, answers queries with a canned response and
/// retrieves a single canned page. `failing` makes every call fail.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<Call>>,
    query: QueryResponse,
    page: Option<RawPage>,
    failure: Option<fn() -> TransportError>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, response: QueryResponse) -> Self {
        self.query = response;
        self
    }

    pub fn with_page(mut self, page: RawPage) -> Self {
        self.page = Some(page);
        self
    }

    pub fn failing(mut self, failure: fn() -> TransportError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PageTransport for MockTransport {
    async fn create_page(
        &self,
        database_id: &str,
        properties: Properties,
    ) -> Result<RawPage, TransportError> {
        self.record(Call::CreatePage {
            database_id: database_id.to_string(),
            properties: properties.clone(),
        })?;
        Ok(RawPage {
            id: CREATED_PAGE_ID.to_string(),
            properties: Some(properties),
        })
    }

    async fn query_database(
        &self,
        database_id: &str,
        args: &QueryArgs,
    ) -> Result<QueryResponse, TransportError> {
        self.record(Call::QueryDatabase {
            database_id: database_id.to_string(),
            args: args.clone(),
        })?;
        Ok(self.query.clone())
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, TransportError> {
        self.record(Call::RetrievePage {
            page_id: page_id.to_string(),
        })?;
        self.page.clone().ok_or_else(|| TransportError::Api {
            status: 404,
            code: "object_not_found".to_string(),
            message: format!("Could not find page with ID: {}", page_id),
        })
    }
}
