//! Schema-mapped data access for one Notion database.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::field::{read_property, write_property, FieldKind, FieldValue};
use crate::property::{Properties, PropertyValue, QueryResponse, RawPage};
use crate::query::{Filter, MultiSelectCondition, QueryArgs, SelectCondition, TextCondition};
use crate::record::Record;
use crate::schema::{FieldDef, ModelSchema};
use crate::transport::{PageTransport, TransportError};

/// Typed client over a single database.
///
/// Holds only immutable configuration and a shared transport, so one
/// instance can serve concurrent calls. Every operation makes at most one
/// remote call; failures surface as [`ModelError::RemoteCallFailed`], while
/// empty results and pages without properties are `Ok(None)`.
pub struct Model {
    transport: Arc<dyn PageTransport>,
    database_id: String,
    title: String,
    schema: ModelSchema,
}

impl Model {
    pub fn new(
        transport: Arc<dyn PageTransport>,
        database_id: impl Into<String>,
        title: impl Into<String>,
        schema: ModelSchema,
    ) -> Self {
        Self {
            transport,
            database_id: database_id.into(),
            title: title.into(),
            schema,
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn unique_field(&self) -> Option<&FieldDef> {
        self.schema.unique_field()
    }

    /// Create a record from plain values.
    ///
    /// Every key must be a schema field. Schema fields left out are not
    /// sent, but still appear (empty) in the returned record.
    pub async fn create(&self, input: &BTreeMap<String, FieldValue>) -> Result<Option<Record>> {
        let properties = self.to_properties(input)?;

        tracing::debug!(
            model = %self.title,
            database_id = %self.database_id,
            fields = properties.len(),
            "creating page"
        );
        let page = self
            .transport
            .create_page(&self.database_id, properties)
            .await
            .map_err(|e| self.remote_failure("create", e))?;

        Ok(self.normalize_page(page))
    }

    /// First record of an unfiltered query.
    pub async fn get(&self) -> Result<Option<Record>> {
        self.query(QueryArgs::default()).await
    }

    /// First record matching `args`.
    pub async fn query(&self, args: QueryArgs) -> Result<Option<Record>> {
        let response = self.run_query("query", &args).await?;
        Ok(self.normalize_first(response))
    }

    /// Every record of the first result page matching `args`.
    pub async fn query_all(&self, args: QueryArgs) -> Result<Vec<Record>> {
        let response = self.run_query("query_all", &args).await?;
        if response.has_more {
            tracing::debug!(
                model = %self.title,
                "query has further result pages; only the first is returned"
            );
        }
        Ok(response
            .results
            .into_iter()
            .filter_map(|page| self.normalize_page(page))
            .collect())
    }

    /// Record with the given page id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Record>> {
        tracing::debug!(model = %self.title, page_id = %id, "retrieving page");
        let page = self
            .transport
            .retrieve_page(id)
            .await
            .map_err(|e| self.remote_failure("find_by_id", e))?;

        Ok(self.normalize_page(page))
    }

    /// First record whose unique field equals `value`.
    ///
    /// Returns `Ok(None)` without a remote call when the schema has no
    /// unique field.
    pub async fn find_by_unique_field(&self, value: &str) -> Result<Option<Record>> {
        let Some(field) = self.schema.unique_field() else {
            return Ok(None);
        };

        let Some(filter) = equality_filter(field, value) else {
            return Ok(None);
        };

        let args = QueryArgs::new().filter(filter);
        let response = self.run_query("find_by_unique_field", &args).await?;
        Ok(self.normalize_first(response))
    }

    async fn run_query(&self, operation: &str, args: &QueryArgs) -> Result<QueryResponse> {
        tracing::debug!(
            model = %self.title,
            database_id = %self.database_id,
            operation,
            "querying database"
        );
        self.transport
            .query_database(&self.database_id, args)
            .await
            .map_err(|e| self.remote_failure(operation, e))
    }

    fn remote_failure(&self, operation: &str, source: TransportError) -> ModelError {
        tracing::warn!("{} on model '{}' failed: {}", operation, self.title, source);
        ModelError::RemoteCallFailed { source }
    }

    fn to_properties(&self, input: &BTreeMap<String, FieldValue>) -> Result<Properties> {
        input
            .iter()
            .map(|(name, value)| -> Result<(String, PropertyValue)> {
                let kind = self
                    .schema
                    .kind_of(name)
                    .ok_or_else(|| ModelError::UnknownField(name.clone()))?;
                Ok((name.clone(), write_property(name, kind, value)?))
            })
            .collect()
    }

    fn normalize_first(&self, response: QueryResponse) -> Option<Record> {
        response
            .results
            .into_iter()
            .next()
            .and_then(|page| self.normalize_page(page))
    }

    /// Normalize a page against the schema. One entry per schema field,
    /// empty when the page lacks the property.
    fn normalize_page(&self, page: RawPage) -> Option<Record> {
        let properties = page.properties?;

        let fields = self
            .schema
            .fields()
            .iter()
            .map(|def| {
                let value = match properties.get(&def.name) {
                    Some(property) => {
                        if let Some(remote) = FieldKind::of_property(property) {
                            if remote != def.kind {
                                tracing::warn!(
                                    "Field '{}' declared {} but stored as {}",
                                    def.name,
                                    def.kind,
                                    remote
                                );
                            }
                        }
                        read_property(&def.name, property)
                    }
                    None => def.kind.empty_value(),
                };
                (def.name.clone(), value)
            })
            .collect();

        Some(Record {
            id: page.id,
            fields,
        })
    }
}

/// Filter matching records whose `field` holds `value`. Files have no
/// equality condition, and the schema never resolves one as unique.
fn equality_filter(field: &FieldDef, value: &str) -> Option<Filter> {
    let value = value.to_string();
    let filter = match field.kind {
        FieldKind::Title => Filter::title(&field.name, TextCondition::Equals(value)),
        FieldKind::RichText => Filter::rich_text(&field.name, TextCondition::Equals(value)),
        FieldKind::Select => Filter::select(&field.name, SelectCondition::Equals(value)),
        FieldKind::MultiSelect => {
            Filter::multi_select(&field.name, MultiSelectCondition::Contains(value))
        }
        FieldKind::Files => return None,
    };
    Some(filter)
}
