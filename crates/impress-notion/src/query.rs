use serde::{Deserialize, Serialize};

/// Arguments of a database query, minus the database id.
///
/// Serializes to the request body of `POST /v1/databases/{id}/query`:
/// - `QueryArgs::default()` → `{}`
/// - `.filter(Filter::title("name", TextCondition::Equals(v)))` →
///   `{"filter": {"property": "name", "title": {"equals": v}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }
}

/// Filter on one property, or a compound of filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    And { and: Vec<Filter> },
    Or { or: Vec<Filter> },
    Property {
        property: String,
        #[serde(flatten)]
        condition: Condition,
    },
}

impl Filter {
    pub fn title(property: impl Into<String>, condition: TextCondition) -> Self {
        Self::on(property, Condition::Title(condition))
    }

    pub fn rich_text(property: impl Into<String>, condition: TextCondition) -> Self {
        Self::on(property, Condition::RichText(condition))
    }

    pub fn select(property: impl Into<String>, condition: SelectCondition) -> Self {
        Self::on(property, Condition::Select(condition))
    }

    pub fn multi_select(property: impl Into<String>, condition: MultiSelectCondition) -> Self {
        Self::on(property, Condition::MultiSelect(condition))
    }

    pub fn files(property: impl Into<String>, condition: EmptinessCondition) -> Self {
        Self::on(property, Condition::Files(condition))
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And { and: filters }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or { or: filters }
    }

    fn on(property: impl Into<String>, condition: Condition) -> Self {
        Filter::Property {
            property: property.into(),
            condition,
        }
    }
}

/// Type-specific condition, keyed by the property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Title(TextCondition),
    RichText(TextCondition),
    Select(SelectCondition),
    MultiSelect(MultiSelectCondition),
    Files(EmptinessCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCondition {
    Equals(String),
    DoesNotEqual(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectCondition {
    Equals(String),
    DoesNotEqual(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectCondition {
    Contains(String),
    DoesNotContain(String),
    IsEmpty(bool),
    IsNotEmpty(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptinessCondition {
    IsEmpty(bool),
    IsNotEmpty(bool),
}

/// Sort descriptor for query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sort {
    Property {
        property: String,
        direction: Direction,
    },
    Timestamp {
        timestamp: Timestamp,
        direction: Direction,
    },
}

impl Sort {
    pub fn ascending(property: impl Into<String>) -> Self {
        Sort::Property {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Sort::Property {
            property: property.into(),
            direction: Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestamp {
    CreatedTime,
    LastEditedTime,
}
